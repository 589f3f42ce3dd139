use async_trait::async_trait;
use std::path::Path;

use crate::utils::Result;

/// Remote source of chapter assets.
///
/// URLs are fully qualified; building them is the caller's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Origin: Send + Sync {
    /// Fetch a small text payload fully into memory
    async fn fetch_text(&self, url: &str) -> Result<String>;

    /// Stream a (possibly large) payload into `dest`.
    ///
    /// On error `dest` must not exist as a complete-looking file.
    async fn fetch_to_file(&self, url: &str, dest: &Path) -> Result<()>;
}
