mod chapter_cache;
mod types;

pub use chapter_cache::ChapterCache;
pub use types::{chapter_slug, ChapterAssetPaths, ChapterStatus};
