//! Cleanup of the model's text into a validated place.
//!
//! The model is told to answer with bare JSON but frequently wraps it in
//! code fences or prose anyway. Cleanup is deliberately blunt: strip every
//! fence marker, take the span from the first `{` to the last `}`, and parse
//! that. There is no second attempt with a narrower span.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::error::ExtractionError;
use crate::model::place::PlaceRecord;

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\s*").expect("json fence pattern"));
static BARE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```\s*").expect("fence pattern"));
static OUTERMOST_BRACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("brace pattern"));

/// Place fields read from the model's answer, before any metadata is attached.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractedPlace {
    pub place_name: String,
    pub city: String,
    pub country: String,
    pub description: String,
    pub category: String,
}

impl ExtractedPlace {
    pub fn into_record(self, id: i64, saved_at: String, image: String) -> PlaceRecord {
        PlaceRecord {
            place_name: self.place_name,
            city: self.city,
            country: self.country,
            description: self.description,
            category: self.category,
            id,
            saved_at,
            image,
        }
    }
}

/// Trims the text and removes every code fence marker, wherever it appears.
pub fn clean_response_text(text: &str) -> String {
    let text = JSON_FENCE.replace_all(text.trim(), "");
    BARE_FENCE.replace_all(&text, "").into_owned()
}

/// First `{` through last `}` of `cleaned`, or all of it when there is no
/// such span.
pub fn candidate_json(cleaned: &str) -> &str {
    OUTERMOST_BRACES
        .find(cleaned)
        .map(|m| m.as_str())
        .unwrap_or(cleaned)
}

/// Parses a model answer.
///
/// `Ok(None)` means the answer was well formed but names no place (a null,
/// missing or empty `placeName`, or a JSON value that is not an object at
/// all); that is a normal outcome, not an error. A bare `null` is the one
/// valid JSON answer that still fails.
pub fn parse_place(text: &str) -> Result<Option<ExtractedPlace>, ExtractionError> {
    let cleaned = clean_response_text(text);
    let value: Value = serde_json::from_str(candidate_json(&cleaned))
        .map_err(|e| ExtractionError::Parse(e.to_string()))?;
    let fields = match value {
        Value::Object(fields) => fields,
        Value::Null => {
            return Err(ExtractionError::Parse("model answered null".to_string()));
        }
        _ => return Ok(None),
    };

    let Some(place_name) = fields.get("placeName").and_then(truthy_text) else {
        return Ok(None);
    };

    Ok(Some(ExtractedPlace {
        place_name,
        city: text_field(&fields, "city"),
        country: text_field(&fields, "country"),
        description: text_field(&fields, "description"),
        category: text_field(&fields, "category"),
    }))
}

// null, false, 0 and "" count as "no value"; any other string is kept as written.
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LUMIERE: &str = r#"{"placeName":"Café Lumière","city":"Paris","country":"France","description":"Cozy cafe","category":"cafe"}"#;

    fn lumiere() -> ExtractedPlace {
        ExtractedPlace {
            place_name: "Café Lumière".to_string(),
            city: "Paris".to_string(),
            country: "France".to_string(),
            description: "Cozy cafe".to_string(),
            category: "cafe".to_string(),
        }
    }

    #[test]
    fn fenced_answer_with_preamble() {
        let text = format!("Here you go:\n```json\n{LUMIERE}\n```");
        assert_eq!(parse_place(&text).unwrap(), Some(lumiere()));
    }

    #[test]
    fn fenced_and_unfenced_agree() {
        let plain = parse_place(LUMIERE).unwrap();
        for fenced in [
            format!("```json\n{LUMIERE}\n```"),
            format!("```json{LUMIERE}```"),
            format!("```\n{LUMIERE}\n```"),
            format!("  \n```json\n{LUMIERE}\n```\n\n"),
        ] {
            assert_eq!(parse_place(&fenced).unwrap(), plain, "input: {fenced:?}");
        }
    }

    #[test]
    fn fences_are_removed_everywhere() {
        assert_eq!(clean_response_text("```json\n{}\n``` and ```more```"), "{}\nand more");
    }

    #[test]
    fn prose_around_object_is_ignored() {
        let text = format!("I found this place. {LUMIERE} Hope that helps!");
        assert_eq!(parse_place(&text).unwrap(), Some(lumiere()));
    }

    #[test]
    fn candidate_is_outermost_span() {
        let text = r#"a {"x": {"y": 1}} b"#;
        assert_eq!(candidate_json(text), r#"{"x": {"y": 1}}"#);
        assert_eq!(candidate_json("no braces here"), "no braces here");
    }

    #[test]
    fn sibling_objects_fail_hard() {
        let text = r#"{"placeName":"A"} and also {"placeName":"B"}"#;
        assert!(matches!(parse_place(text), Err(ExtractionError::Parse(_))));
    }

    #[test]
    fn null_place_name_is_no_place() {
        assert_eq!(parse_place(r#"{"placeName": null}"#).unwrap(), None);
    }

    #[test]
    fn falsy_place_names_are_no_place() {
        for text in [
            r#"{"city":"Paris"}"#,
            r#"{"placeName":""}"#,
            r#"{"placeName":false}"#,
            r#"{"placeName":0}"#,
        ] {
            assert_eq!(parse_place(text).unwrap(), None, "input: {text}");
        }
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            parse_place(r#"{"placeName": "Louvre", }"#),
            Err(ExtractionError::Parse(_))
        ));
        assert!(matches!(parse_place(""), Err(ExtractionError::Parse(_))));
        assert!(matches!(
            parse_place("Sorry, I can't see any place."),
            Err(ExtractionError::Parse(_))
        ));
    }

    #[test]
    fn non_object_json_is_no_place() {
        for text in ["42", r#""just text""#, "true", "[1, 2]"] {
            assert_eq!(parse_place(text).unwrap(), None, "input: {text}");
        }
    }

    #[test]
    fn bare_null_is_parse_error() {
        assert!(matches!(parse_place("null"), Err(ExtractionError::Parse(_))));
    }

    #[test]
    fn strings_are_kept_as_written() {
        let place = parse_place(r#"{"placeName":"   ","city":" Kyoto ","description":"Temple\n"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(place.place_name, "   ");
        assert_eq!(place.city, " Kyoto ");
        assert_eq!(place.description, "Temple\n");
    }

    #[test]
    fn loose_field_types_are_stringified() {
        let place = parse_place(r#"{"placeName": 54, "city": null, "country": 1, "category": "bar"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(place.place_name, "54");
        assert_eq!(place.city, "");
        assert_eq!(place.country, "1");
        assert_eq!(place.description, "");
        assert_eq!(place.category, "bar");
    }

    #[test]
    fn into_record_attaches_metadata() {
        let record = lumiere().into_record(
            42,
            "2026-10-18T09:30:00.000Z".to_string(),
            "data:image/png;base64,AA==".to_string(),
        );
        assert_eq!(record.id, 42);
        assert_eq!(record.place_name, "Café Lumière");
        assert_eq!(record.image, "data:image/png;base64,AA==");
    }
}
