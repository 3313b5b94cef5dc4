//! Course Library persistence: entities, the repository contract and the
//! in-memory store that backs it.

pub mod entities;
pub mod memory;
pub mod repository;
pub mod seed;

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use courselib_kernel::{InitCtx, Module};

pub use entities::{Author, Course};
pub use memory::{CommitError, InMemoryRepository, InMemoryStore};
pub use repository::{CourseLibraryRepository, RepositoryFactory};

/// Core module owning the in-memory store lifecycle.
pub struct DbModule {
    store: InMemoryStore,
}

impl DbModule {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for DbModule {
    fn name(&self) -> &'static str {
        "db"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        if ctx.settings.database.seed {
            seed::seed(&self.store)
                .await
                .context("failed to seed course library")?;
        }
        tracing::info!(
            module = self.name(),
            seeded = ctx.settings.database.seed,
            "db module initialized"
        );
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let authors = self.store.unit_of_work().get_authors().await?.len();
        tracing::info!(module = self.name(), authors, "db module stopped");
        Ok(())
    }
}

/// Create the `db` core module around a shared store
pub fn create_module(store: InMemoryStore) -> Arc<dyn Module> {
    Arc::new(DbModule::new(store))
}
