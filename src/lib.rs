pub mod app;
pub mod cache;
pub mod catalog;
pub mod cli;
pub mod constants;
pub mod origin;
pub mod server;
pub mod utils;

pub use app::{load_config, AppState, Config};
pub use cache::{ChapterAssetPaths, ChapterCache, ChapterStatus};
pub use catalog::{Catalog, ChapterRecord};
pub use origin::{HttpOrigin, Origin};
pub use utils::ChapterError;
