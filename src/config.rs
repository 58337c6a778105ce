use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use regex::Regex;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,
    #[serde(default)]
    pub upstream_config: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Where the two upstream APIs live and how long to wait for them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_description_base_url")]
    pub description_base_url: String,
    #[serde(default = "default_transform_base_url")]
    pub transform_base_url: String,
    /// Whole-request timeout, connect included
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_description_base_url() -> String {
    "https://pokeapi.co/api/v2/pokemon-species".to_string()
}

fn default_transform_base_url() -> String {
    "https://api.funtranslations.com/translate/shakespeare.json".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            description_base_url: default_description_base_url(),
            transform_base_url: default_transform_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Load a JSON (`.json`) or YAML (anything else) config file.
    ///
    /// `${VAR}` placeholders are replaced from the environment before
    /// parsing; unset variables are left in place.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            bail!("Configuration file not found: {}", path);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path))?;
        let content = substitute_env_vars(&content)?;

        let path_lower = path.to_lowercase();
        let config: Config = if path_lower.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON configuration: {}", path))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid YAML configuration: {}", path))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Apply `PORT`, `DESCRIPTION_API_URL` and `TRANSFORM_API_URL` when set
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(port) = std::env::var("PORT") {
            self.system_config.port = port
                .parse()
                .with_context(|| format!("PORT is not a valid port: {}", port))?;
        }
        if let Ok(url) = std::env::var("DESCRIPTION_API_URL") {
            self.upstream_config.description_base_url = url;
        }
        if let Ok(url) = std::env::var("TRANSFORM_API_URL") {
            self.upstream_config.transform_base_url = url;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        self.upstream_config.description_url()?;
        self.upstream_config.transform_url()?;

        if self.upstream_config.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than 0");
        }
        if self.upstream_config.connect_timeout_secs == 0 {
            bail!("connect_timeout_secs must be greater than 0");
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.system_config.host, self.system_config.port);
        addr.parse()
            .with_context(|| format!("Invalid listen address: {}", addr))
    }
}

impl UpstreamConfig {
    pub fn description_url(&self) -> Result<Url> {
        parse_base_url("description_base_url", &self.description_base_url)
    }

    pub fn transform_url(&self) -> Result<Url> {
        parse_base_url("transform_base_url", &self.transform_base_url)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn parse_base_url(field: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value).with_context(|| format!("{} is not a valid URL: {}", field, value))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        bail!("{} must be an http(s) URL: {}", field, value);
    }
    Ok(url)
}

fn substitute_env_vars(content: &str) -> Result<String> {
    let pattern = Regex::new(r"\$\{(\w+)\}")?;
    let replaced = pattern.replace_all(content, |caps: &regex::Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| {
            debug!("Environment variable {} is not set, keeping placeholder", &caps[1]);
            caps[0].to_string()
        })
    });
    Ok(replaced.into_owned())
}
