//! Configuration of the `bs-api` command line tool.
//!
//! The configuration can come from a YAML file, from environment variables, or
//! both; environment variables win.
//!
//! # Configuration File Format
//!
//! ```yaml
//! api:
//!   # Token of the developer account, see https://developer.brawlstars.com
//!   token: "eyJ0eXAiOiJKV1Qi..."
//!   # Optional, base URL of the API (e.g. a proxy)
//!   url: "https://api.brawlstars.com/v1"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Variables are prefixed with `BS_API_` and nested keys are separated with `__`:
//!
//! ```bash
//! export BS_API_API__TOKEN="eyJ0eXAiOiJKV1Qi..."
//! export BS_API_API__URL="https://bsproxy.example.com/v1"
//! ```

use bs_api::API_URL;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

/// Root configuration structure.
#[derive(Deserialize, Debug)]
pub struct Config {
    /// API access configuration
    pub api: Api,
}

/// API access configuration.
#[derive(Deserialize, Debug)]
pub struct Api {
    /// Bearer token of the developer account.
    ///
    /// Tokens are bound to the IP addresses declared on the developer portal.
    pub token: String,

    /// Base URL of the API, without trailing slash.
    #[serde(default = "default_url")]
    pub url: String,
}

fn default_url() -> String {
    API_URL.to_string()
}

impl Config {
    /// Loads the configuration.
    ///
    /// # Arguments
    ///
    /// * `path` - Optional path to a YAML file. A missing file is treated as empty.
    ///
    /// # Errors
    ///
    /// Fails when no token is provided by either source, or when the file is
    /// not valid YAML.
    pub fn load(path: Option<&str>) -> Result<Config, figment::Error> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }

        figment
            .merge(Env::prefixed("BS_API_").split("__"))
            .extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn clear_env() {
        // SAFETY: tests touching the environment are serialized
        unsafe {
            std::env::remove_var("BS_API_API__TOKEN");
            std::env::remove_var("BS_API_API__URL");
        }
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        clear_env();
        let file = config_file("api:\n  token: file-token\n");

        let config = Config::load(file.path().to_str()).unwrap();

        assert_eq!(config.api.token, "file-token");
        assert_eq!(config.api.url, "https://api.brawlstars.com/v1");
    }

    #[test]
    #[serial]
    fn test_load_url_from_file() {
        clear_env();
        let file = config_file("api:\n  token: t\n  url: http://localhost:8080/v1\n");

        let config = Config::load(file.path().to_str()).unwrap();

        assert_eq!(config.api.url, "http://localhost:8080/v1");
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let file = config_file("api:\n  token: file-token\n");
        // SAFETY: tests touching the environment are serialized
        unsafe {
            std::env::set_var("BS_API_API__TOKEN", "env-token");
        }

        let config = Config::load(file.path().to_str());
        clear_env();

        assert_eq!(config.unwrap().api.token, "env-token");
    }

    #[test]
    #[serial]
    fn test_env_only() {
        clear_env();
        // SAFETY: tests touching the environment are serialized
        unsafe {
            std::env::set_var("BS_API_API__TOKEN", "env-token");
        }

        let config = Config::load(None);
        clear_env();

        assert_eq!(config.unwrap().api.token, "env-token");
    }

    #[test]
    #[serial]
    fn test_missing_token_fails() {
        clear_env();
        assert!(Config::load(None).is_err());
        assert!(Config::load(Some("does-not-exist.yaml")).is_err());
    }

    #[test]
    #[serial]
    fn test_invalid_yaml_fails() {
        clear_env();
        let file = config_file("api: [token\n");
        assert!(Config::load(file.path().to_str()).is_err());
    }
}
