//! # Image Analysis Service Module
//!
//! Server-side proxy for place extraction, so the model API key never has to
//! reach the browser.
//!
//! ## Sub-modules:
//! - `proxy`: the request handler and its error mapping.

mod proxy;

use actix_web::web::{post, resource, scope, to};
use actix_web::Scope;

pub use proxy::ProxyState;

/// The base path for the analysis endpoint.
const API_PATH: &str = "/api";

/// Configures and returns the Actix `Scope` for the analysis route.
///
/// # Registered Routes:
///
/// *   **`POST /analyze-image`**:
///     - **Handler**: `proxy::process`
///     - **Description**: Expects `{ "image": <base64>, "mediaType": <string> }`,
///       forwards the image and the extraction prompt to the model API with the
///       server-held key and returns the API's response body verbatim. Failures
///       come back as `{ "error": <message> }`.
///
/// Any other method on that path answers `405` with the same error shape.
pub fn configure_routes() -> Scope {
    scope(API_PATH).app_data(proxy::json_config()).service(
        resource("/analyze-image")
            .route(post().to(proxy::process))
            .default_service(to(proxy::method_not_allowed)),
    )
}
