use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Bundled sample profiles, resolved against the crate so the default works from any working directory.
pub const DEFAULT_PROFILES_PATH: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/data/profiles.json");
const DEFAULT_CONVERSATION_TTL_MINUTES: i64 = 120;
/// One year. Keeps `now + ttl` far away from chrono's representable range.
const MAX_CONVERSATION_TTL_MINUTES: i64 = 60 * 24 * 365;

/// Application configuration loaded from environment variables.
/// Fails at startup if a value is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub profiles_path: String,
    /// When absent the advisor runs offline.
    pub anthropic_api_key: Option<String>,
    /// Overrides the Anthropic endpoint, e.g. for a proxy.
    pub anthropic_base_url: Option<String>,
    pub disable_llm: bool,
    pub conversation_ttl: chrono::Duration,
    pub max_conversation_messages: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 4000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            profiles_path: optional_env("PROFILES_PATH")
                .unwrap_or_else(|| DEFAULT_PROFILES_PATH.to_string()),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            anthropic_base_url: optional_env("ANTHROPIC_BASE_URL"),
            disable_llm: parse_flag(optional_env("DISABLE_LLM").as_deref()),
            conversation_ttl: parse_ttl(optional_env("CONVERSATION_TTL_MINUTES").as_deref())?,
            max_conversation_messages: parse_env("MAX_CONVERSATION_MESSAGES", 20)?,
        })
    }

    /// True when chat turns should go to the model.
    pub fn llm_enabled(&self) -> bool {
        !self.disable_llm && self.anthropic_api_key.is_some()
    }
}

/// Reads a variable, treating empty values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

/// Conversation TTL in whole minutes; must be positive and at most a year.
fn parse_ttl(raw: Option<&str>) -> Result<chrono::Duration> {
    let minutes = match raw {
        Some(raw) => raw.parse::<i64>().with_context(|| {
            format!("CONVERSATION_TTL_MINUTES must be a valid number, got '{raw}'")
        })?,
        None => DEFAULT_CONVERSATION_TTL_MINUTES,
    };
    if !(1..=MAX_CONVERSATION_TTL_MINUTES).contains(&minutes) {
        bail!(
            "CONVERSATION_TTL_MINUTES must be between 1 and {MAX_CONVERSATION_TTL_MINUTES}, got {minutes}"
        );
    }
    chrono::Duration::try_minutes(minutes)
        .with_context(|| format!("CONVERSATION_TTL_MINUTES out of range: {minutes}"))
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(value, Some(v) if v.eq_ignore_ascii_case("true") || v == "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: Option<&str>, disable_llm: bool) -> Config {
        Config {
            port: 4000,
            rust_log: "info".to_string(),
            profiles_path: DEFAULT_PROFILES_PATH.to_string(),
            anthropic_api_key: api_key.map(str::to_string),
            anthropic_base_url: None,
            disable_llm,
            conversation_ttl: chrono::Duration::minutes(120),
            max_conversation_messages: 20,
        }
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag(Some("true")));
        assert!(parse_flag(Some("TRUE")));
        assert!(parse_flag(Some("1")));
        assert!(!parse_flag(Some("false")));
        assert!(!parse_flag(Some("yes please")));
        assert!(!parse_flag(None));
    }

    #[test]
    fn test_llm_enabled_needs_key_and_no_kill_switch() {
        assert!(config(Some("sk-test"), false).llm_enabled());
        assert!(!config(Some("sk-test"), true).llm_enabled());
        assert!(!config(None, false).llm_enabled());
    }

    #[test]
    fn test_parse_env_falls_back_to_default_when_unset() {
        let value: u16 = parse_env("CREDIT_COACH_TEST_UNSET_PORT", 4000).unwrap();
        assert_eq!(value, 4000);
    }

    #[test]
    fn test_parse_ttl_defaults_to_two_hours() {
        assert_eq!(parse_ttl(None).unwrap(), chrono::Duration::minutes(120));
        assert_eq!(parse_ttl(Some("15")).unwrap(), chrono::Duration::minutes(15));
    }

    #[test]
    fn test_parse_ttl_rejects_huge_values_instead_of_panicking() {
        let err = parse_ttl(Some("9223372036854775807")).unwrap_err();
        assert!(err.to_string().contains("CONVERSATION_TTL_MINUTES"));
        assert!(parse_ttl(Some("99999999999")).is_err());
    }

    #[test]
    fn test_parse_ttl_rejects_zero_and_negative() {
        assert!(parse_ttl(Some("0")).is_err());
        assert!(parse_ttl(Some("-5")).is_err());
        assert!(parse_ttl(Some("soon")).is_err());
    }

    #[test]
    fn test_default_profiles_path_points_at_bundled_file() {
        assert!(std::path::Path::new(DEFAULT_PROFILES_PATH).is_file());
    }
}
