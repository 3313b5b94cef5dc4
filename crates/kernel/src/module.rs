use async_trait::async_trait;
use axum::Router;

use crate::settings::Settings;

/// Prefix every module router is nested under.
pub const API_PREFIX: &str = "/api";

/// Mount point of the module called `name`.
pub fn mount_path(name: &str) -> String {
    format!("{}/{}", API_PREFIX, name)
}

/// What a module sees while it is initialized and started.
pub struct InitCtx<'a> {
    pub settings: &'a Settings,
}

/// A unit of the Course Library the registry boots, serves and stops.
///
/// Every hook has a no-op default so a module only overrides what it owns:
/// the `db` module has no routes, the `authors` module has no storage.
#[async_trait]
pub trait Module: Sync + Send {
    /// Registry key and last segment of the mount path
    fn name(&self) -> &'static str;

    /// Where [`routes`](Module::routes) is nested
    fn mount_path(&self) -> String {
        mount_path(self.name())
    }

    /// Runs once at boot, core modules first.
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Routes relative to [`mount_path`](Module::mount_path)
    fn routes(&self) -> Router {
        Router::new()
    }

    /// OpenAPI fragment with `paths` relative to the mount path and
    /// `components.schemas` merged as-is.
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Runs at shutdown, custom modules first.
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
