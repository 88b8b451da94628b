use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, info};

use super::error::ExtractionError;
use super::parser::{ExtractedPlace, parse_place};
use super::wire::{RawResponse, decode_response};
use crate::model::image::ImagePayload;
use crate::model::place::PlaceRecord;

/// Shown when the model answered but could not name a place.
pub const NO_PLACE_MESSAGE: &str = "Couldn't find a clear location in this screenshot. Try one with a location tag or place mentioned in the caption!";

/// How an image reaches the model API.
///
/// The browser calls the API directly with its own key or goes through the
/// server proxy; the server calls it with the server-held key. All of them
/// hand back the undecoded response. One attempt, no retry.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, image: &ImagePayload) -> Result<RawResponse, ExtractionError>;
}

/// Outcome of a successful round trip.
#[derive(Clone, Debug, PartialEq)]
pub enum Extraction {
    /// A place was found. The record is complete but not saved yet.
    Found(PlaceRecord),
    /// The model answered but named no place.
    NoPlace,
}

/// Hands out strictly increasing record ids based on wall-clock milliseconds.
///
/// Two records created within the same millisecond still get distinct ids:
/// the second one is bumped past the first.
#[derive(Debug)]
pub struct IdSequence {
    last: AtomicI64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self {
            last: AtomicI64::new(i64::MIN),
        }
    }

    /// A sequence whose ids are all greater than `id`, typically the highest
    /// id already in the store.
    pub fn starting_after(id: i64) -> Self {
        Self {
            last: AtomicI64::new(id),
        }
    }

    pub fn next(&self, now_ms: i64) -> i64 {
        let bump = |last: i64| now_ms.max(last.saturating_add(1));
        match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(bump(last)))
        {
            Ok(previous) | Err(previous) => bump(previous),
        }
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Sends an image through a [`Transport`] and turns the answer into a
/// [`PlaceRecord`] ready to be saved.
pub struct ExtractionClient<T> {
    transport: T,
    ids: IdSequence,
}

impl<T: Transport> ExtractionClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            ids: IdSequence::new(),
        }
    }

    pub fn with_ids(mut self, ids: IdSequence) -> Self {
        self.ids = ids;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn extract(&self, image: &ImagePayload) -> Result<Extraction, ExtractionError> {
        debug!(
            "sending {} image ({} base64 chars) for extraction",
            image.media_type,
            image.data.len()
        );
        let raw = self.transport.send(image).await?;
        let response = decode_response(&raw)?;

        match parse_place(response.text())? {
            Some(place) => Ok(Extraction::Found(self.accept(place, image, Utc::now()))),
            None => {
                info!("model found no place in the image");
                Ok(Extraction::NoPlace)
            }
        }
    }

    /// Attaches id, timestamp and the image data URI.
    pub fn accept(
        &self,
        place: ExtractedPlace,
        image: &ImagePayload,
        now: DateTime<Utc>,
    ) -> PlaceRecord {
        let id = self.ids.next(now.timestamp_millis());
        place.into_record(
            id,
            now.to_rfc3339_opts(SecondsFormat::Millis, true),
            image.data_uri(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use std::cell::Cell;

    struct StubTransport {
        reply: Result<RawResponse, ExtractionError>,
        calls: Cell<usize>,
    }

    impl StubTransport {
        fn answering(text: &str) -> Self {
            let body = json!({"content": [{"type": "text", "text": text}]}).to_string();
            Self::replying(Ok(RawResponse::new(200, body)))
        }

        fn replying(reply: Result<RawResponse, ExtractionError>) -> Self {
            Self {
                reply,
                calls: Cell::new(0),
            }
        }
    }

    impl Transport for StubTransport {
        async fn send(&self, _image: &ImagePayload) -> Result<RawResponse, ExtractionError> {
            self.calls.set(self.calls.get() + 1);
            self.reply.clone()
        }
    }

    fn image() -> ImagePayload {
        ImagePayload::from_bytes("image/png", b"screenshot").unwrap()
    }

    #[tokio::test]
    async fn found_place_gets_metadata() {
        let client = ExtractionClient::new(StubTransport::answering(
            "```json\n{\"placeName\":\"Café Lumière\",\"city\":\"Paris\",\"country\":\"France\",\"description\":\"Cozy cafe\",\"category\":\"cafe\"}\n```",
        ));

        let Extraction::Found(record) = client.extract(&image()).await.unwrap() else {
            panic!("expected a place");
        };
        assert_eq!(record.place_name, "Café Lumière");
        assert_eq!(record.category, "cafe");
        assert_eq!(record.image, image().data_uri());
        assert!(record.id > 0);
        assert!(DateTime::parse_from_rfc3339(&record.saved_at).is_ok());
        assert!(record.saved_at.ends_with('Z'));
    }

    #[tokio::test]
    async fn null_place_is_no_place() {
        let client = ExtractionClient::new(StubTransport::answering(r#"{"placeName": null}"#));
        assert_eq!(client.extract(&image()).await.unwrap(), Extraction::NoPlace);
    }

    #[tokio::test]
    async fn transport_failure_is_single_attempt() {
        let client = ExtractionClient::new(StubTransport::replying(Err(
            ExtractionError::Transport("connection refused".into()),
        )));
        let err = client.extract(&image()).await.unwrap_err();
        assert_eq!(err, ExtractionError::Transport("connection refused".into()));
        assert_eq!(client.transport().calls.get(), 1);
    }

    #[tokio::test]
    async fn upstream_error_payload_surfaces_message() {
        let body = json!({"type": "error", "error": {"type": "overloaded_error", "message": "Overloaded"}});
        let client = ExtractionClient::new(StubTransport::replying(Ok(RawResponse::new(
            529,
            body.to_string(),
        ))));
        let err = client.extract(&image()).await.unwrap_err();
        assert_eq!(err.user_message(), "Failed to process image: Overloaded");
    }

    #[tokio::test]
    async fn unparseable_answer_is_parse_error() {
        let client = ExtractionClient::new(StubTransport::answering("I see a beach."));
        assert!(matches!(
            client.extract(&image()).await,
            Err(ExtractionError::Parse(_))
        ));
    }

    #[test]
    fn accept_formats_timestamp_like_iso_strings() {
        let client = ExtractionClient::new(StubTransport::answering("{}"));
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        let place = ExtractedPlace {
            place_name: "Louvre".into(),
            city: "Paris".into(),
            country: "France".into(),
            description: String::new(),
            category: "attraction".into(),
        };
        let record = client.accept(place, &image(), now);
        assert_eq!(record.saved_at, "2026-10-18T09:30:00.000Z");
        assert_eq!(record.id, now.timestamp_millis());
    }

    #[test]
    fn ids_never_repeat_within_a_tick() {
        let ids = IdSequence::new();
        assert_eq!(ids.next(1_000), 1_000);
        assert_eq!(ids.next(1_000), 1_001);
        assert_eq!(ids.next(999), 1_002);
        assert_eq!(ids.next(5_000), 5_000);
    }

    #[test]
    fn ids_start_after_existing_maximum() {
        let ids = IdSequence::starting_after(2_000);
        assert_eq!(ids.next(1_500), 2_001);
        assert_eq!(ids.next(3_000), 3_000);
    }
}
