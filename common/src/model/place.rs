use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A place accepted from an extraction, as shown in the UI and persisted in
/// the local store.
///
/// The JSON shape (camelCase keys) is the persisted layout: a stored list is
/// a plain array of these objects. Everything except `placeName` and `id`
/// may be missing, `null` or a non-string value (entries saved by older
/// versions kept whatever the model returned) and loads as text.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRecord {
    /// Name of the place. Never empty for a record that made it into the store.
    pub place_name: String,
    #[serde(default, deserialize_with = "loose_text")]
    pub city: String,
    #[serde(default, deserialize_with = "loose_text")]
    pub country: String,
    #[serde(default, deserialize_with = "loose_text")]
    pub description: String,
    /// Free-form category label as returned by the model. See [`Category`].
    #[serde(default, deserialize_with = "loose_text")]
    pub category: String,
    /// Handle used for deletion. Unique within a store.
    pub id: i64,
    /// ISO 8601 UTC timestamp with millisecond precision.
    #[serde(default, deserialize_with = "loose_text")]
    pub saved_at: String,
    /// Source screenshot as a `data:<media type>;base64,...` URI.
    #[serde(default, deserialize_with = "loose_text")]
    pub image: String,
}

/// `null` becomes `""`, strings are kept as written, anything else is
/// rendered as JSON text.
fn loose_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    })
}

impl PlaceRecord {
    /// Parsed form of the free-form `category` label.
    pub fn category_kind(&self) -> Category {
        Category::from_label(&self.category)
    }

    /// "City, Country", leaving out whichever part is empty.
    pub fn location_label(&self) -> String {
        [self.city.trim(), self.country.trim()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Known place categories. The model is asked for one of these but nothing
/// forces it to comply, so unknown labels collapse into `Other`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Restaurant,
    Hotel,
    Attraction,
    Cafe,
    Bar,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Restaurant,
        Category::Hotel,
        Category::Attraction,
        Category::Cafe,
        Category::Bar,
        Category::Other,
    ];

    /// Case-insensitive parse of a category label.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "restaurant" => Category::Restaurant,
            "hotel" => Category::Hotel,
            "attraction" => Category::Attraction,
            "cafe" | "café" => Category::Cafe,
            "bar" => Category::Bar,
            _ => Category::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Restaurant => "restaurant",
            Category::Hotel => "hotel",
            Category::Attraction => "attraction",
            Category::Cafe => "cafe",
            Category::Bar => "bar",
            Category::Other => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PlaceRecord {
        PlaceRecord {
            place_name: "Café Lumière".to_string(),
            city: "Paris".to_string(),
            country: "France".to_string(),
            description: "Cozy cafe".to_string(),
            category: "cafe".to_string(),
            id: 1_700_000_000_000,
            saved_at: "2026-10-18T09:30:00.000Z".to_string(),
            image: "data:image/png;base64,AAAA".to_string(),
        }
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(record()).unwrap();
        assert_eq!(value["placeName"], "Café Lumière");
        assert_eq!(value["savedAt"], "2026-10-18T09:30:00.000Z");
        assert_eq!(value["id"], 1_700_000_000_000i64);
        assert!(value.get("place_name").is_none());
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let parsed: PlaceRecord =
            serde_json::from_str(r#"{"placeName":"Louvre","id":7}"#).unwrap();
        assert_eq!(parsed.place_name, "Louvre");
        assert_eq!(parsed.city, "");
        assert_eq!(parsed.image, "");
    }

    #[test]
    fn null_and_loose_fields_load_as_text() {
        let parsed: PlaceRecord = serde_json::from_str(
            r#"{"placeName":"Louvre","city":null,"country":"France","description":null,"category":3,"id":7,"savedAt":null,"image":null}"#,
        )
        .unwrap();
        assert_eq!(parsed.city, "");
        assert_eq!(parsed.description, "");
        assert_eq!(parsed.category, "3");
        assert_eq!(parsed.saved_at, "");
        assert_eq!(parsed.location_label(), "France");
    }

    #[test]
    fn location_label_skips_empty_parts() {
        let mut place = record();
        assert_eq!(place.location_label(), "Paris, France");
        place.city.clear();
        assert_eq!(place.location_label(), "France");
        place.country = "  ".to_string();
        assert_eq!(place.location_label(), "");
    }

    #[test]
    fn category_labels_are_parsed_loosely() {
        assert_eq!(Category::from_label("Restaurant"), Category::Restaurant);
        assert_eq!(Category::from_label(" BAR "), Category::Bar);
        assert_eq!(Category::from_label("museum"), Category::Other);
        assert_eq!(record().category_kind(), Category::Cafe);
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.as_str()), category);
        }
    }
}
