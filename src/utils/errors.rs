use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the chapter service
#[derive(Error, Debug)]
pub enum ChapterError {
    #[error("Unknown chapter id: {0}")]
    UnknownChapter(i64),

    #[error("Remote fetch of {url} failed: {cause}")]
    RemoteFetch { url: String, cause: FetchCause },

    #[error("IO error at {path:?}: {source}")]
    LocalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Why a remote fetch failed
#[derive(Error, Debug)]
pub enum FetchCause {
    #[error("HTTP status {0}")]
    Status(StatusCode),

    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Network(#[source] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

impl ChapterError {
    pub fn local_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LocalIo {
            path: path.into(),
            source,
        }
    }

    pub fn remote(url: impl Into<String>, cause: FetchCause) -> Self {
        Self::RemoteFetch {
            url: url.into(),
            cause,
        }
    }

    /// HTTP status the surface should answer with for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownChapter(_) => StatusCode::NOT_FOUND,
            Self::RemoteFetch { .. } => StatusCode::BAD_GATEWAY,
            Self::LocalIo { .. } | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for FetchCause {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::Status(status)
        } else {
            Self::Network(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, ChapterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ChapterError::UnknownChapter(19).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ChapterError::remote("http://x", FetchCause::Status(StatusCode::NOT_FOUND)).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ChapterError::local_io("/tmp", std::io::Error::other("disk full")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages_carry_context() {
        let err = ChapterError::remote("http://origin/02/plain_chapter.json", FetchCause::Timeout);
        let msg = err.to_string();
        assert!(msg.contains("http://origin/02/plain_chapter.json"));
        assert!(msg.contains("timed out"));
    }
}
