//! Application bootstrap shared by the binary and the CLI.

use std::sync::Arc;

use anyhow::Context;
use courselib_db::InMemoryStore;
use courselib_kernel::{InitCtx, ModuleRegistry, Settings};

use crate::modules;

/// Register the `db` core module and every project module around one store.
pub fn build_registry(settings: &Settings, store: InMemoryStore) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    registry.register_core(courselib_db::create_module(store.clone()));
    modules::register_all(&mut registry, Arc::new(store), settings);
    registry
}

/// Boot all modules, serve HTTP until a shutdown signal, then stop modules.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        host = %settings.server.host,
        port = settings.server.port,
        "course-library bootstrap starting"
    );

    let registry = build_registry(&settings, InMemoryStore::new());
    let ctx = InitCtx {
        settings: &settings,
    };

    registry
        .boot(&ctx)
        .await
        .context("failed to boot modules")?;

    tracing::info!(
        core = registry.core_module_count(),
        custom = registry.custom_module_count(),
        "course-library bootstrap complete"
    );

    let served = courselib_http::start_server(&registry, &settings).await;

    registry
        .shutdown()
        .await
        .context("failed to stop modules")?;

    served
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_holds_db_and_authors_modules() {
        let settings = Settings::default();
        let registry = build_registry(&settings, InMemoryStore::new());

        assert_eq!(registry.core_module_count(), 1);
        assert_eq!(registry.custom_module_count(), 1);
        assert!(registry.get_module("db").is_some());
        assert!(registry.get_module("authors").is_some());
    }
}
