//! Browser-side transports: straight to the model API with a client key, or
//! through the server proxy.

use common::extraction::{
    ExtractionError, MessagesRequest, RawResponse, Transport, API_KEY_HEADER, API_VERSION,
    API_VERSION_HEADER, MESSAGES_URL,
};
use common::model::image::ImagePayload;
use common::requests::AnalyzeImageRequest;
use gloo_net::http::{Request, Response};

use crate::config;

pub struct DirectTransport {
    api_key: String,
}

impl Transport for DirectTransport {
    async fn send(&self, image: &ImagePayload) -> Result<RawResponse, ExtractionError> {
        let response = Request::post(MESSAGES_URL)
            .header(API_KEY_HEADER, &self.api_key)
            .header(API_VERSION_HEADER, API_VERSION)
            .json(&MessagesRequest::for_image(image))
            .map_err(transport_error)?
            .send()
            .await
            .map_err(transport_error)?;
        read_raw(response).await
    }
}

pub struct ProxyTransport {
    url: String,
}

impl Transport for ProxyTransport {
    async fn send(&self, image: &ImagePayload) -> Result<RawResponse, ExtractionError> {
        let body = AnalyzeImageRequest {
            image: image.data.clone(),
            media_type: image.media_type.clone(),
        };
        let response = Request::post(&self.url)
            .json(&body)
            .map_err(transport_error)?
            .send()
            .await
            .map_err(transport_error)?;
        read_raw(response).await
    }
}

/// The transport picked at startup from the build configuration.
pub enum AppTransport {
    Direct(DirectTransport),
    Proxy(ProxyTransport),
}

impl AppTransport {
    pub fn from_config() -> Self {
        match config::client_api_key() {
            Some(api_key) => AppTransport::Direct(DirectTransport {
                api_key: api_key.to_string(),
            }),
            None => AppTransport::Proxy(ProxyTransport {
                url: config::proxy_url().to_string(),
            }),
        }
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, AppTransport::Direct(_))
    }
}

impl Transport for AppTransport {
    async fn send(&self, image: &ImagePayload) -> Result<RawResponse, ExtractionError> {
        match self {
            AppTransport::Direct(transport) => transport.send(image).await,
            AppTransport::Proxy(transport) => transport.send(image).await,
        }
    }
}

async fn read_raw(response: Response) -> Result<RawResponse, ExtractionError> {
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;
    Ok(RawResponse::new(status, body))
}

fn transport_error(e: gloo_net::Error) -> ExtractionError {
    ExtractionError::Transport(e.to_string())
}
