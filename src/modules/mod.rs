pub mod authors;

use std::sync::Arc;

use courselib_db::RepositoryFactory;
use courselib_kernel::{ModuleRegistry, Settings};

/// Register all project-specific modules with the registry
pub fn register_all(
    registry: &mut ModuleRegistry,
    repositories: Arc<dyn RepositoryFactory>,
    settings: &Settings,
) {
    registry.register_custom(authors::create_module(
        repositories,
        settings.paging.clone(),
    ));
}
