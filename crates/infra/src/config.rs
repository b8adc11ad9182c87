//! Hosted-backend configuration.

use anyhow::Context;

/// Connection settings for the hosted backend.
///
/// One base URL serves both the identity endpoints (`/auth/v1/...`) and the
/// data endpoints (`/rest/v1/...`).
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub api_key: String,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Read the backend settings from the environment.
    ///
    /// `GROWSTACK_BACKEND_URL` and `GROWSTACK_BACKEND_KEY` must both be set;
    /// callers decide the fallback when they are not (the api binary falls
    /// back to the in-memory backend and logs a warning).
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url =
            std::env::var("GROWSTACK_BACKEND_URL").context("GROWSTACK_BACKEND_URL is not set")?;
        let api_key =
            std::env::var("GROWSTACK_BACKEND_KEY").context("GROWSTACK_BACKEND_KEY is not set")?;
        Ok(Self::new(base_url, api_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_normalized() {
        let config = BackendConfig::new("https://backend.example.com/", "key");
        assert_eq!(config.base_url, "https://backend.example.com");
    }
}
