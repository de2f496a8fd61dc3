use std::future::Future;

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::{error::RequestFailure, params::GenerationParams};

/// Something that turns generation parameters into image references.
pub trait ImageGenerator: Send + Sync {
    fn generate(
        &self,
        params: &GenerationParams,
    ) -> impl Future<Output = Result<Vec<String>, RequestFailure>> + Send;
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    images: Option<Vec<String>>,
}

/// Posts parameters as JSON to a configured endpoint and reads back `images`.
#[derive(Clone, Debug)]
pub struct HttpImageGenerator {
    client: Client,
    endpoint: Url,
}

impl HttpImageGenerator {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

impl ImageGenerator for HttpImageGenerator {
    async fn generate(&self, params: &GenerationParams) -> Result<Vec<String>, RequestFailure> {
        tracing::debug!(endpoint = %self.endpoint, ?params, "sending image generation request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(params)
            .send()
            .await?;

        // The status is only reported; the body decides success.
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(status, %body, "image service responded");

        parse_generation_response(status, &body)
    }
}

fn parse_generation_response(status: u16, body: &str) -> Result<Vec<String>, RequestFailure> {
    let payload: GenerationResponse = serde_json::from_str(body)
        .map_err(|source| RequestFailure::InvalidJson { status, source })?;
    payload
        .images
        .ok_or(RequestFailure::MissingImages { status })
}
