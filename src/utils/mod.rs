// Gateway module for utils - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod errors;
mod fs;
mod logger;

// Public re-exports - the ONLY way to access utils functionality
pub use errors::{ChapterError, FetchCause, Result};
pub use fs::{commit_partial, discard_partial, partial_path, write_atomic};
pub use logger::init_logger;
