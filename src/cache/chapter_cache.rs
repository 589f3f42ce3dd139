use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

use super::types::{chapter_slug, ChapterAssetPaths, ChapterStatus};
use crate::catalog::Catalog;
use crate::constants::{CHAPTER_AUDIO, CHAPTER_JSON};
use crate::origin::Origin;
use crate::utils::{write_atomic, ChapterError, Result};

/// Lazily populated on-disk cache of chapter metadata and audio.
///
/// Layout: `<data_dir>/<slug>/plain_chapter.json` and
/// `<data_dir>/<slug>/plain_chapter.m4a`. Files are never re-fetched once
/// present and nothing is ever evicted.
pub struct ChapterCache {
    catalog: Arc<Catalog>,
    origin: Arc<dyn Origin>,
    data_dir: PathBuf,
    base_url: String,
    locks: Mutex<HashMap<u32, Arc<tokio::sync::Mutex<()>>>>,
}

impl ChapterCache {
    /// Create a cache. No filesystem access happens until first use.
    pub fn new(
        catalog: Arc<Catalog>,
        origin: Arc<dyn Origin>,
        data_dir: impl Into<PathBuf>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            catalog,
            origin,
            data_dir: data_dir.into(),
            base_url,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Make sure both asset files for `chapter_id` exist locally.
    ///
    /// Each file is checked on its own, so a chapter missing only its
    /// audio only downloads the audio. Errors propagate unchanged.
    pub async fn ensure(&self, chapter_id: i64) -> Result<ChapterAssetPaths> {
        let id = self.known_id(chapter_id)?;

        let lock = self.chapter_lock(id);
        let _guard = lock.lock().await;

        let chapter_dir = self.chapter_dir(id);
        fs::create_dir_all(&chapter_dir)
            .await
            .map_err(|e| ChapterError::local_io(&chapter_dir, e))?;

        let paths = self.paths_in(&chapter_dir);

        if !exists(&paths.json_path).await? {
            let text = self.origin.fetch_text(&self.remote_url(id, CHAPTER_JSON)).await?;
            write_atomic(&paths.json_path, text.as_bytes()).await?;
        }

        if !exists(&paths.audio_path).await? {
            self.origin
                .fetch_to_file(&self.remote_url(id, CHAPTER_AUDIO), &paths.audio_path)
                .await?;
        }

        Ok(paths)
    }

    /// Report which assets are cached for a chapter without fetching anything
    pub async fn status(&self, chapter_id: i64) -> Result<ChapterStatus> {
        let id = self.known_id(chapter_id)?;
        let paths = self.paths_in(&self.chapter_dir(id));

        Ok(ChapterStatus {
            chapter_id: id,
            json_cached: exists(&paths.json_path).await?,
            audio_cached: exists(&paths.audio_path).await?,
        })
    }

    /// Where a chapter's assets live (or will live), without touching disk
    pub fn asset_paths(&self, chapter_id: i64) -> Result<ChapterAssetPaths> {
        let id = self.known_id(chapter_id)?;
        Ok(self.paths_in(&self.chapter_dir(id)))
    }

    /// Full origin URL of one of a chapter's files
    pub fn remote_url(&self, chapter_id: u32, file_name: &str) -> String {
        format!("{}/{}/{}", self.base_url, chapter_slug(chapter_id), file_name)
    }

    fn known_id(&self, chapter_id: i64) -> Result<u32> {
        if !self.catalog.contains(chapter_id) {
            return Err(ChapterError::UnknownChapter(chapter_id));
        }
        u32::try_from(chapter_id).map_err(|_| ChapterError::UnknownChapter(chapter_id))
    }

    fn chapter_dir(&self, chapter_id: u32) -> PathBuf {
        self.data_dir.join(chapter_slug(chapter_id))
    }

    fn paths_in(&self, chapter_dir: &Path) -> ChapterAssetPaths {
        ChapterAssetPaths {
            json_path: chapter_dir.join(CHAPTER_JSON),
            audio_path: chapter_dir.join(CHAPTER_AUDIO),
        }
    }

    fn chapter_lock(&self, chapter_id: u32) -> Arc<tokio::sync::Mutex<()>> {
        self.locks.lock().entry(chapter_id).or_default().clone()
    }
}

async fn exists(path: &Path) -> Result<bool> {
    fs::try_exists(path)
        .await
        .map_err(|e| ChapterError::local_io(path, e))
}
