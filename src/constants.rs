/// Constants module to avoid magic numbers in the codebase

// Origin
pub const DEFAULT_ORIGIN_BASE_URL: &str = "https://www.sgsgitafoundation.org/bg";
pub const CHAPTER_JSON: &str = "plain_chapter.json";
pub const CHAPTER_AUDIO: &str = "plain_chapter.m4a";
pub const AUDIO_CONTENT_TYPE: &str = "audio/mp4";

// Suffix for in-flight downloads, renamed into place once complete
pub const DOWNLOAD_SUFFIX: &str = "download";

// Timeouts
pub const TEXT_FETCH_TIMEOUT_SECS: u64 = 30;
pub const AUDIO_FETCH_TIMEOUT_SECS: u64 = 60;

// Streaming
pub const DOWNLOAD_CHUNK_SIZE: usize = 1024 * 1024; // 1 MiB

// Server
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATA_DIR: &str = "data";

// Config
pub const APP_NAME: &str = "gita";
pub const ENV_PREFIX: &str = "GITA_";
pub const LOCAL_CONFIG_PATH: &str = ".gita/config.toml";
