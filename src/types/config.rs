//! Configuration types for the service and the chunker.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::QgenError;
use crate::{DEFAULT_MAX_CHUNK_LENGTH, DEFAULT_MODEL, DEFAULT_NUM_QUESTIONS};

/// Environment variable prefix, e.g. `QGEN_PORT=8080`.
pub const ENV_PREFIX: &str = "QGEN";

/// Optional configuration file basename (`qgen.toml`, `qgen.json`, ...).
pub const CONFIG_FILE: &str = "qgen";

/// Global service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP listen port
    pub port: u16,

    /// Maximum chunk length in characters
    pub max_chunk_length: usize,

    /// Count the separating space when filling chunks
    pub strict_chunk_length: bool,

    /// Questions per document when the request does not say
    pub default_num_questions: usize,

    /// URL of the text2text-generation inference endpoint
    pub generation_url: String,

    /// Bearer token for the inference endpoint
    pub generation_api_token: Option<String>,

    /// Model id, used when the endpoint URL is derived from it
    pub model: String,

    /// Per-request timeout for model calls
    pub generation_timeout_secs: u64,

    /// Maximum concurrent PDF extractions
    pub extraction_concurrency: usize,

    /// Fixed seed for question sampling (reproducible output)
    pub sampling_seed: Option<u64>,

    /// Idle sessions older than this are dropped
    pub session_ttl_minutes: i64,

    /// Maximum multipart request body size
    pub max_upload_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: 3017,
            max_chunk_length: DEFAULT_MAX_CHUNK_LENGTH,
            strict_chunk_length: false,
            default_num_questions: DEFAULT_NUM_QUESTIONS,
            generation_url: format!("https://api-inference.huggingface.co/models/{DEFAULT_MODEL}"),
            generation_api_token: None,
            model: DEFAULT_MODEL.to_string(),
            generation_timeout_secs: 120,
            extraction_concurrency: default_parallelism(),
            sampling_seed: None,
            session_ttl_minutes: 60,
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from `qgen.*` in the working directory (if any)
    /// and `QGEN_*` environment variables, on top of the defaults.
    pub fn load() -> Result<Self, QgenError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load configuration using the given file path (extension optional).
    pub fn load_from(path: &Path) -> Result<Self, QgenError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let mut loaded: ServiceConfig = settings.try_deserialize()?;
        if loaded.extraction_concurrency == 0 {
            loaded.extraction_concurrency = default_parallelism();
        }
        Ok(loaded)
    }

    /// Chunk settings derived from this configuration.
    pub fn chunk_config(&self) -> ChunkConfig {
        let config = ChunkConfig::with_max_length(self.max_chunk_length);
        if self.strict_chunk_length {
            config.strict()
        } else {
            config
        }
    }
}

fn default_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Configuration for individual chunk operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkConfig {
    /// Maximum characters per chunk
    pub max_length: usize,

    /// When false, the space joining two sentences is not counted against
    /// `max_length`, so a multi-sentence chunk may reach `max_length + 1`.
    pub strict_length: bool,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_CHUNK_LENGTH,
            strict_length: false,
        }
    }
}

impl ChunkConfig {
    /// Create a config with the given maximum length.
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length,
            ..Default::default()
        }
    }

    /// Count the separating space against the bound.
    pub fn strict(mut self) -> Self {
        self.strict_length = true;
        self
    }
}
