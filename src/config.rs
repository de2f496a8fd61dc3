use std::net::{IpAddr, SocketAddr};

use url::Url;

use crate::error::ConfigError;

/// Placeholder endpoint left in unconfigured deployments.
pub const PLACEHOLDER_ENDPOINT: &str = "YOUR_API_URL";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: SocketAddr,
    pub image_api_url: Url,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let image_api_url = match non_blank("IMAGE_API_URL") {
            Some(raw) => validate_endpoint(&raw)?,
            None => return Err(ConfigError::MissingEndpoint),
        };

        let host = non_blank("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let ip = host
            .trim()
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidHost(host.clone()))?;
        let port = match non_blank("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            bind_address: SocketAddr::new(ip, port),
            image_api_url,
        })
    }
}

pub fn validate_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::MissingEndpoint);
    }
    if trimmed == PLACEHOLDER_ENDPOINT {
        return Err(ConfigError::PlaceholderEndpoint(trimmed.to_string()));
    }
    let parsed =
        Url::parse(trimmed).map_err(|err| ConfigError::InvalidEndpoint(err.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(ConfigError::InvalidEndpoint(format!(
            "unsupported scheme `{scheme}`"
        ))),
    }
}
