//! Server configuration read from the environment.
//!
//! | variable | default |
//! |---|---|
//! | `TRAVEL_SAVER_HOST` | `127.0.0.1` |
//! | `TRAVEL_SAVER_PORT` | `8080` |
//! | `TRAVEL_SAVER_OPEN_BROWSER` | `false` |
//! | `ANTHROPIC_API_KEY` | unset |
//! | `TRAVEL_SAVER_UPSTREAM_URL` | the public messages endpoint |
//! | `TRAVEL_SAVER_MODEL` | `claude-sonnet-4-20250514` |
//! | `TRAVEL_SAVER_MAX_TOKENS` | `1000` |

use common::extraction::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, MESSAGES_URL};
use log::warn;
use std::str::FromStr;

/// Value shipped in sample env files; treated as "no key".
const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub open_browser: bool,
    pub upstream: UpstreamConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpstreamConfig {
    /// `None` when missing, empty or still the placeholder.
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let text = |key: &str, default: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            host: text("TRAVEL_SAVER_HOST", "127.0.0.1"),
            port: parsed(&lookup, "TRAVEL_SAVER_PORT", 8080),
            open_browser: parsed(&lookup, "TRAVEL_SAVER_OPEN_BROWSER", false),
            upstream: UpstreamConfig {
                api_key: lookup("ANTHROPIC_API_KEY")
                    .map(|key| key.trim().to_string())
                    .filter(|key| !key.is_empty() && key != PLACEHOLDER_API_KEY),
                endpoint: text("TRAVEL_SAVER_UPSTREAM_URL", MESSAGES_URL),
                model: text("TRAVEL_SAVER_MODEL", DEFAULT_MODEL),
                max_tokens: parsed(&lookup, "TRAVEL_SAVER_MAX_TOKENS", DEFAULT_MAX_TOKENS),
            },
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parsed<T: FromStr + Copy>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}", key, raw);
            default
        }),
        _ => default,
    }
}
