use serde::Serialize;
use std::path::PathBuf;

/// Two-digit, zero-padded rendering of a chapter id ("03" for 3)
pub fn chapter_slug(chapter_id: u32) -> String {
    format!("{:02}", chapter_id)
}

/// Local locations of one chapter's assets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterAssetPaths {
    pub json_path: PathBuf,
    pub audio_path: PathBuf,
}

/// What is already on disk for a chapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChapterStatus {
    pub chapter_id: u32,
    pub json_cached: bool,
    pub audio_cached: bool,
}

impl ChapterStatus {
    pub fn is_complete(&self) -> bool {
        self.json_cached && self.audio_cached
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_padding() {
        assert_eq!(chapter_slug(0), "00");
        assert_eq!(chapter_slug(3), "03");
        assert_eq!(chapter_slug(18), "18");
        assert_eq!(chapter_slug(100), "100");
    }
}
