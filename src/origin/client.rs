use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, RequestBuilder, Response};
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::time::timeout;
use tracing::debug;

use super::traits::Origin;
use crate::app::OriginConfig;
use crate::utils::{
    commit_partial, discard_partial, partial_path, ChapterError, FetchCause, Result,
};

/// Origin implementation over HTTP using reqwest
#[derive(Debug, Clone)]
pub struct HttpOrigin {
    client: Client,
    text_timeout: Duration,
    audio_timeout: Duration,
    chunk_size: usize,
}

impl HttpOrigin {
    /// Create a client from the origin section of the configuration
    pub fn new(config: &OriginConfig) -> Result<Self> {
        Self::with_limits(
            Duration::from_secs(config.text_timeout_secs),
            Duration::from_secs(config.audio_timeout_secs),
            config.chunk_size,
        )
    }

    pub fn with_limits(
        text_timeout: Duration,
        audio_timeout: Duration,
        chunk_size: usize,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("gita-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ChapterError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            text_timeout,
            audio_timeout,
            chunk_size: chunk_size.max(1),
        })
    }

    /// Send a GET and reject any non-success status
    async fn get(&self, url: &str, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| ChapterError::remote(url, e.into()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChapterError::remote(url, FetchCause::Status(status)));
        }

        Ok(response)
    }

    /// Copy the body into `partial`, buffering at most one chunk in memory.
    ///
    /// `audio_timeout` bounds each wait for the next chunk, not the transfer.
    async fn stream_body(&self, url: &str, response: Response, partial: &Path) -> Result<u64> {
        let file = File::create(partial)
            .await
            .map_err(|e| ChapterError::local_io(partial, e))?;
        let mut writer = BufWriter::with_capacity(self.chunk_size, file);
        let mut stream = response.bytes_stream();
        let mut written = 0u64;

        while let Some(chunk) = timeout(self.audio_timeout, stream.next())
            .await
            .map_err(|_| ChapterError::remote(url, FetchCause::Timeout))?
        {
            let chunk = chunk.map_err(|e| ChapterError::remote(url, e.into()))?;
            writer
                .write_all(&chunk)
                .await
                .map_err(|e| ChapterError::local_io(partial, e))?;
            written += chunk.len() as u64;
        }

        writer
            .flush()
            .await
            .map_err(|e| ChapterError::local_io(partial, e))?;
        writer
            .into_inner()
            .sync_all()
            .await
            .map_err(|e| ChapterError::local_io(partial, e))?;

        Ok(written)
    }
}

#[async_trait]
impl Origin for HttpOrigin {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!(url, "fetching text");
        let request = self.client.get(url).timeout(self.text_timeout);
        let response = self.get(url, request).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| ChapterError::remote(url, e.into()))?;

        String::from_utf8(body.to_vec()).map_err(|e| {
            ChapterError::remote(url, FetchCause::Other(format!("body is not UTF-8: {e}")))
        })
    }

    async fn fetch_to_file(&self, url: &str, dest: &Path) -> Result<()> {
        debug!(url, dest = %dest.display(), "streaming to file");
        let response = timeout(self.audio_timeout, self.get(url, self.client.get(url)))
            .await
            .map_err(|_| ChapterError::remote(url, FetchCause::Timeout))??;
        let partial = partial_path(dest);

        match self.stream_body(url, response, &partial).await {
            Ok(bytes) => {
                debug!(url, bytes, "download complete");
                commit_partial(&partial, dest).await
            }
            Err(e) => {
                discard_partial(&partial).await;
                Err(e)
            }
        }
    }
}
