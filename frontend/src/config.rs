//! Build-time configuration.
//!
//! `TRAVEL_SAVER_API_KEY` makes the browser call the model API directly with
//! that key, which then ships inside the wasm bundle. Without it every
//! request goes through the server proxy at `TRAVEL_SAVER_PROXY_URL`.

const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

const DEFAULT_PROXY_URL: &str = "/api/analyze-image";

pub fn client_api_key() -> Option<&'static str> {
    usable_key(option_env!("TRAVEL_SAVER_API_KEY"))
}

pub fn proxy_url() -> &'static str {
    option_env!("TRAVEL_SAVER_PROXY_URL")
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_PROXY_URL)
}

fn usable_key(raw: Option<&'static str>) -> Option<&'static str> {
    raw.map(str::trim)
        .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_and_blank_keys_are_unusable() {
        assert_eq!(usable_key(None), None);
        assert_eq!(usable_key(Some("")), None);
        assert_eq!(usable_key(Some("your_api_key_here")), None);
        assert_eq!(usable_key(Some(" sk-ant-123 ")), Some("sk-ant-123"));
    }
}
