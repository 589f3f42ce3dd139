/// Chapter catalog module - Gateway
mod chapters;

pub use chapters::{Catalog, ChapterRecord};
