use reqwest::header::HeaderValue;
use std::fmt;

use crate::error::ChatError;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Credential for the remote service. `Debug` and `Display` never print the
/// secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        ApiKey(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(**********)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("**********")
    }
}

/// Resolves the credential: an explicit non-empty value wins, then the
/// `OPENAI_API_KEY` entry returned by `lookup`. The key must be usable as a
/// bearer `Authorization` header.
pub fn resolve_api_key<F>(explicit: Option<&str>, lookup: F) -> Result<ApiKey, ChatError>
    where F: Fn(&str) -> Option<String>
{
    let key = match explicit.filter(|k| !k.is_empty()) {
        Some(key) => key.to_string(),
        None =>
            lookup(API_KEY_ENV)
                .filter(|k| !k.is_empty())
                .ok_or_else(||
                    ChatError::configuration(
                        format!("no API key given and the {} environment variable is not set", API_KEY_ENV)
                    )
                )?,
    };
    HeaderValue::from_str(&format!("Bearer {}", key)).map_err(|e| {
        ChatError::configuration(format!("API key cannot be sent as a header: {}", e))
    })?;
    Ok(ApiKey::new(key))
}

/// Environment lookup backed by the current process.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(key: Option<&'static str>) -> impl Fn(&str) -> Option<String> {
        move |name| {
            assert_eq!(name, API_KEY_ENV);
            key.map(str::to_string)
        }
    }

    #[test]
    fn explicit_key_wins_over_environment() {
        let key = resolve_api_key(Some("sk-explicit"), env_with(Some("sk-env"))).unwrap();
        assert_eq!(key.expose(), "sk-explicit");
    }

    #[test]
    fn falls_back_to_environment() {
        assert_eq!(resolve_api_key(None, env_with(Some("sk-env"))).unwrap().expose(), "sk-env");
        assert_eq!(resolve_api_key(Some(""), env_with(Some("sk-env"))).unwrap().expose(), "sk-env");
    }

    #[test]
    fn missing_everywhere_is_a_configuration_error() {
        let err = resolve_api_key(None, env_with(None)).unwrap_err();
        assert!(matches!(err, ChatError::Configuration(_)));

        let err = resolve_api_key(None, env_with(Some(""))).unwrap_err();
        assert!(matches!(err, ChatError::Configuration(_)));
    }

    #[test]
    fn key_unusable_as_header_is_a_configuration_error() {
        let err = resolve_api_key(Some("sk-bad\nkey"), env_with(None)).unwrap_err();
        assert!(matches!(err, ChatError::Configuration(_)));
        assert!(!err.to_string().contains("sk-bad"));

        let err = resolve_api_key(None, env_with(Some("sk-bad\rkey"))).unwrap_err();
        assert!(matches!(err, ChatError::Configuration(_)));
    }

    #[test]
    fn secret_is_redacted() {
        let key = ApiKey::new("sk-very-secret");
        assert!(!format!("{:?}", key).contains("sk-very-secret"));
        assert!(!key.to_string().contains("sk-very-secret"));
    }
}
