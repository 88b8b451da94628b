//! Server-side transport: calls the model API with the server-held key.

use common::extraction::{
    API_KEY_HEADER, API_VERSION, API_VERSION_HEADER, ExtractionError, MessagesRequest,
    RawResponse, Transport,
};
use common::model::image::ImagePayload;
use log::debug;

use crate::config::UpstreamConfig;

#[derive(Clone)]
pub struct AnthropicTransport {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicTransport {
    /// `None` when no key is configured; the proxy then refuses requests
    /// without contacting the API.
    pub fn from_config(config: &UpstreamConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        Some(Self {
            http: reqwest::Client::new(),
            api_key,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }
}

impl Transport for AnthropicTransport {
    async fn send(&self, image: &ImagePayload) -> Result<RawResponse, ExtractionError> {
        let request = MessagesRequest::for_image(image)
            .with_model(&self.model)
            .with_max_tokens(self.max_tokens);

        let response = self
            .http
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .header(API_VERSION_HEADER, API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| ExtractionError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ExtractionError::Transport(e.to_string()))?;
        debug!("upstream answered HTTP {} ({} bytes)", status, body.len());
        Ok(RawResponse::new(status, body))
    }
}
