use thiserror::Error;

/// A failed round trip to the image-generation service.
///
/// Failures are logged by the controller and never shown to the user.
#[derive(Debug, Error)]
pub enum RequestFailure {
    #[error("image service request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("image service returned a non-JSON body (HTTP {status}): {source}")]
    InvalidJson {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("image service response (HTTP {status}) has no `images` list")]
    MissingImages { status: u16 },
}

/// Problems found while reading configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IMAGE_API_URL is not configured")]
    MissingEndpoint,

    #[error("IMAGE_API_URL is still the placeholder `{0}`")]
    PlaceholderEndpoint(String),

    #[error("IMAGE_API_URL is not a valid http(s) URL: {0}")]
    InvalidEndpoint(String),

    #[error("invalid HOST `{0}`")]
    InvalidHost(String),

    #[error("invalid PORT `{0}`")]
    InvalidPort(String),
}
