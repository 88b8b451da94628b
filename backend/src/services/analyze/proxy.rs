use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::error::InternalError;
use actix_web::{web, HttpResponse};
use common::extraction::{decode_response, ExtractionError, RawResponse, Transport};
use common::model::image::ImagePayload;
use common::requests::{AnalyzeImageRequest, ErrorResponse};
use log::{error, info, warn};

use crate::upstream::AnthropicTransport;

/// Screenshots arrive base64-encoded inside the JSON body.
const JSON_LIMIT: usize = 10 * 1024 * 1024;

/// Shared handler state. `transport` is `None` when the server has no API key.
#[derive(Clone, Default)]
pub struct ProxyState {
    pub transport: Option<AnthropicTransport>,
}

pub async fn process(
    state: web::Data<ProxyState>,
    payload: web::Json<AnalyzeImageRequest>,
) -> HttpResponse {
    let Some(transport) = state.transport.as_ref() else {
        error!("analyze-image called but ANTHROPIC_API_KEY is not configured");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "ANTHROPIC_API_KEY is not configured on the server",
        );
    };
    forward(transport, &payload).await
}

/// Sends one image upstream and maps the outcome onto the proxy's responses.
pub async fn forward<T: Transport>(transport: &T, payload: &AnalyzeImageRequest) -> HttpResponse {
    let image = match ImagePayload::from_base64(&payload.media_type, &payload.image) {
        Ok(image) => image,
        Err(e) => {
            warn!("Rejected analyze-image request: {}", e);
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    info!("Analyzing {} screenshot", image.media_type);
    match transport.send(&image).await {
        Ok(raw) => relay(raw),
        Err(e) => {
            error!("API Error: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

fn relay(raw: RawResponse) -> HttpResponse {
    match decode_response(&raw) {
        Ok(_) => HttpResponse::Ok()
            .content_type(ContentType::json())
            .body(raw.body),
        Err(ExtractionError::Upstream(message)) => {
            warn!("Upstream rejected request (HTTP {}): {}", raw.status, message);
            error_response(StatusCode::BAD_REQUEST, message)
        }
        Err(e) => {
            error!("Unusable upstream response: {}", e);
            error_response(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

pub async fn method_not_allowed() -> HttpResponse {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// JSON extractor settings for the proxy: larger body limit and errors in
/// the `{ "error": ... }` shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _req| {
            let response = error_response(StatusCode::BAD_REQUEST, err.to_string());
            InternalError::from_response(err, response).into()
        })
}

fn error_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse::new(message))
}
