//! Client configuration.
//!
//! # Environment Variables
//!
//! - `PINMAP_API_URL` - Base URL of the API, without the `/locations` suffix
//!   (default: `http://localhost:3000/api`)

use url::Url;

use crate::error::ClientError;

/// API base used when `PINMAP_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// Where the client sends its requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL, always ending in `/` so relative joins append to it.
    pub api_url: Url,
}

impl ClientConfig {
    /// Build a configuration from a base URL string.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidBaseUrl` if the string is not an
    /// absolute `http` or `https` URL.
    pub fn new(api_url: &str) -> Result<Self, ClientError> {
        let mut url = Url::parse(api_url.trim())
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{api_url}: {e}")))?;

        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl(api_url.to_owned()));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self { api_url: url })
    }

    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidBaseUrl` if `PINMAP_API_URL` is malformed.
    pub fn from_env() -> Result<Self, ClientError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = std::env::var("PINMAP_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());

        Self::new(&api_url)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_trailing_slash() {
        let config = ClientConfig::new("http://localhost:3000/api").unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:3000/api/");

        let config = ClientConfig::new("https://pins.example/api/").unwrap();
        assert_eq!(config.api_url.as_str(), "https://pins.example/api/");
    }

    #[test]
    fn test_default_url() {
        let config = ClientConfig::new(DEFAULT_API_URL).unwrap();
        assert_eq!(
            config.api_url.join("locations").unwrap().as_str(),
            "http://localhost:3000/api/locations"
        );
    }

    #[test]
    fn test_rejects_non_http() {
        assert!(matches!(
            ClientConfig::new("mailto:someone@example.com"),
            Err(ClientError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(ClientError::InvalidBaseUrl(_))
        ));
    }
}
