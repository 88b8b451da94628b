/// Messages endpoint of the upstream model API.
pub const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

pub const DEFAULT_MAX_TOKENS: u32 = 1000;

pub const API_VERSION: &str = "2023-06-01";

pub const API_KEY_HEADER: &str = "x-api-key";

pub const API_VERSION_HEADER: &str = "anthropic-version";

/// Instruction sent after the image. The field names and category values
/// here are the contract the parser relies on.
pub const EXTRACTION_PROMPT: &str = r#"Analyze this Instagram/TikTok screenshot and extract place information. Look for location tags, place names in captions, text overlays, addresses, and restaurant/hotel/attraction names.

Return ONLY valid JSON (no markdown, no code fences, no extra text) with this exact structure:
{
  "placeName": "Name of the place",
  "city": "City name",
  "country": "Country",
  "description": "Brief description from caption or context",
  "category": "restaurant/hotel/attraction/cafe/bar/other"
}

If no clear place is found, set placeName to null."#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::place::Category;

    #[test]
    fn prompt_names_every_field_and_category() {
        for field in ["placeName", "city", "country", "description", "category"] {
            assert!(EXTRACTION_PROMPT.contains(&format!("\"{field}\"")));
        }
        for category in Category::ALL {
            assert!(EXTRACTION_PROMPT.contains(category.as_str()));
        }
        assert!(EXTRACTION_PROMPT.contains("set placeName to null"));
    }
}
