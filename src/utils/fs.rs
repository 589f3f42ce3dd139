use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::errors::{ChapterError, Result};
use crate::constants::DOWNLOAD_SUFFIX;

/// Sibling path used while a file is being written, e.g. `x.m4a.download`
pub fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".");
    name.push(DOWNLOAD_SUFFIX);
    dest.with_file_name(name)
}

/// Move a fully written partial file into its final place.
///
/// The partial file is removed if the rename fails.
pub async fn commit_partial(partial: &Path, dest: &Path) -> Result<()> {
    if let Err(e) = fs::rename(partial, dest).await {
        discard_partial(partial).await;
        return Err(ChapterError::local_io(dest, e));
    }
    Ok(())
}

/// Best-effort cleanup of an abandoned partial file
pub async fn discard_partial(partial: &Path) {
    let _ = fs::remove_file(partial).await;
}

/// Write `contents` to `dest` so that `dest` only ever holds complete data
pub async fn write_atomic(dest: &Path, contents: &[u8]) -> Result<()> {
    let partial = partial_path(dest);

    let written = async {
        let mut file = fs::File::create(&partial).await?;
        file.write_all(contents).await?;
        file.sync_all().await
    }
    .await;

    if let Err(e) = written {
        discard_partial(&partial).await;
        return Err(ChapterError::local_io(&partial, e));
    }

    commit_partial(&partial, dest).await
}
