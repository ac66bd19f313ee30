//! Engine configuration from the environment.

use std::env;
use std::time::Duration;

const DEFAULT_SIDECAR_URL: &str = "http://localhost:8000";
const DEFAULT_CHUNK_SIZE: usize = 20;
const DEFAULT_MAX_WORDS: usize = 100;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL of the model sidecar.
    pub sidecar_url: String,
    /// Comments annotated per progress chunk. Does not affect results.
    pub chunk_size: usize,
    /// Default word cloud size.
    pub max_words: usize,
    /// Timeout for a single inference request.
    pub request_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sidecar_url: DEFAULT_SIDECAR_URL.to_owned(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_words: DEFAULT_MAX_WORDS,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl EngineConfig {
    /// Read configuration from the environment, falling back to defaults for
    /// anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            sidecar_url: env::var("ML_SIDECAR_URL").unwrap_or(defaults.sidecar_url),
            chunk_size: env_parse("ANALYSIS_CHUNK_SIZE", defaults.chunk_size),
            max_words: env_parse("WORDCLOUD_MAX_WORDS", defaults.max_words),
            request_timeout: Duration::from_secs(env_parse(
                "ML_REQUEST_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.chunk_size, 20);
        assert_eq!(config.max_words, 100);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}
