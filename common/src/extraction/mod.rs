//! # Place extraction
//!
//! Turns a screenshot into a [`PlaceRecord`](crate::model::place::PlaceRecord)
//! by asking a multimodal model to read it.
//!
//! ## Sub-modules:
//! - `prompt`: the fixed instruction and the upstream API constants.
//! - `wire`: request/response shapes of the messages API and decoding of raw responses.
//! - `parser`: cleanup of the model's free-form text into a validated place.
//! - `client`: the [`Transport`] seam, [`ExtractionClient`] and id allocation.
//! - `error`: the failure taxonomy shared by every transport.

mod client;
mod error;
mod parser;
mod prompt;
mod wire;

pub use client::{Extraction, ExtractionClient, IdSequence, NO_PLACE_MESSAGE, Transport};
pub use error::ExtractionError;
pub use parser::{ExtractedPlace, candidate_json, clean_response_text, parse_place};
pub use prompt::{
    API_KEY_HEADER, API_VERSION, API_VERSION_HEADER, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    EXTRACTION_PROMPT, MESSAGES_URL,
};
pub use wire::{
    ApiError, ContentBlock, ImageSource, Message, MessagesRequest, MessagesResponse,
    RawResponse, RequestBlock, decode_response,
};
