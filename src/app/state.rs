use std::sync::Arc;

use crate::app::Config;
use crate::cache::ChapterCache;
use crate::catalog::Catalog;
use crate::origin::{HttpOrigin, Origin};
use crate::utils::Result;

/// Shared, immutable application state built once at startup
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: Arc<Config>,
    /// Chapter catalog
    pub catalog: Arc<Catalog>,
    /// Chapter asset cache
    pub cache: Arc<ChapterCache>,
}

impl AppState {
    /// Create app state talking to the configured HTTP origin
    pub fn new(config: Config) -> Result<Self> {
        let origin = HttpOrigin::new(&config.origin)?;
        Ok(Self::with_origin(config, Catalog::gita(), Arc::new(origin)))
    }

    /// Create app state with an explicit catalog and origin
    pub fn with_origin(config: Config, catalog: Catalog, origin: Arc<dyn Origin>) -> Self {
        let catalog = Arc::new(catalog);
        let cache = Arc::new(ChapterCache::new(
            catalog.clone(),
            origin,
            config.cache.data_dir.clone(),
            config.origin.base_url.clone(),
        ));

        Self {
            config: Arc::new(config),
            catalog,
            cache,
        }
    }
}
