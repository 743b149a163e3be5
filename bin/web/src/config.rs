//! Web client configuration.
//!
//! The server loads [`WebConfig`] from the environment via the `config`
//! crate and hands the browser the [`ClientConfig`] subset through a server
//! function.

use serde::{Deserialize, Serialize};

/// Storage container cover images are uploaded into.
pub const DEFAULT_IMAGE_CONTAINER: &str = "delib-image-container";

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Base URL of the library REST API, e.g. `https://api.delib.example`.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Image upload settings.
    #[serde(default)]
    pub images: ImageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageConfig {
    #[serde(default = "default_image_container")]
    pub container: String,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_image_container() -> String {
    DEFAULT_IMAGE_CONTAINER.to_string()
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            container: default_image_container(),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            images: ImageConfig::default(),
        }
    }
}

impl WebConfig {
    /// Loads configuration from environment variables.
    ///
    /// Nested keys use `__`, so `IMAGES__CONTAINER` sets
    /// `images.container`.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but malformed.
    #[cfg(feature = "ssr")]
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// The part of the configuration the browser needs.
    pub fn client(&self) -> ClientConfig {
        ClientConfig {
            api_url: self.api_url.trim_end_matches('/').to_string(),
            image_container: self.images.container.clone(),
        }
    }
}

/// Settings shipped to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_url: String,
    pub image_container: String,
}
