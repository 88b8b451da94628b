use base64::{engine::general_purpose, Engine as _};

use crate::extraction::ExtractionError;

/// An uploaded screenshot, already base64-encoded and tagged with its media
/// type. This is what travels to the model API and what ends up embedded in
/// the saved record.
#[derive(Clone, Debug, PartialEq)]
pub struct ImagePayload {
    pub media_type: String,
    /// Standard base64, no `data:` prefix.
    pub data: String,
}

impl ImagePayload {
    /// Encodes raw file bytes. Fails before anything is sent when the media
    /// type is not an image or the file is empty.
    pub fn from_bytes(media_type: &str, bytes: &[u8]) -> Result<Self, ExtractionError> {
        let payload = Self {
            media_type: media_type.trim().to_string(),
            data: general_purpose::STANDARD.encode(bytes),
        };
        payload.validate()?;
        Ok(payload)
    }

    /// Wraps data that is already base64-encoded, e.g. a proxy request body.
    pub fn from_base64(media_type: &str, data: &str) -> Result<Self, ExtractionError> {
        let payload = Self {
            media_type: media_type.trim().to_string(),
            data: data.trim().to_string(),
        };
        payload.validate()?;
        Ok(payload)
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }

    fn validate(&self) -> Result<(), ExtractionError> {
        if !is_image_media_type(&self.media_type) {
            return Err(ExtractionError::InvalidInput(format!(
                "unsupported media type '{}'",
                self.media_type
            )));
        }
        if self.data.is_empty() {
            return Err(ExtractionError::InvalidInput("image is empty".to_string()));
        }
        Ok(())
    }
}

/// True for `image/*` media types.
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type
        .trim()
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_bytes_and_builds_data_uri() {
        let payload = ImagePayload::from_bytes("image/png", b"png!").unwrap();
        assert_eq!(payload.data, "cG5nIQ==");
        assert_eq!(payload.data_uri(), "data:image/png;base64,cG5nIQ==");
    }

    #[test]
    fn rejects_non_image_media_types() {
        let err = ImagePayload::from_bytes("application/pdf", b"%PDF").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidInput(_)));
        assert!(!is_image_media_type("text/plain"));
        assert!(!is_image_media_type("img"));
        assert!(is_image_media_type("IMAGE/JPEG"));
    }

    #[test]
    fn rejects_empty_images() {
        assert!(ImagePayload::from_bytes("image/jpeg", &[]).is_err());
        assert!(ImagePayload::from_base64("image/jpeg", "  ").is_err());
    }
}
