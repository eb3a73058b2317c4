//! Package name parsing for badge requests

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::InputError;

static APP_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9_]+\.[a-zA-Z0-9_]+(\.[a-zA-Z0-9_]+)*")
        .expect("invalid app id regex")
});

/// A package name such as `org.mozilla.firefox`.
///
/// At least two dot-separated segments of ASCII letters, digits and
/// underscores. The value is always a substring of what the user sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(String);

impl AppId {
    /// Resolve a package name from raw user input.
    ///
    /// A pasted listing URL (anything with an `id=` query parameter) is
    /// tried through that parameter first. When the parameter holds no
    /// valid name, the first pattern match anywhere in the raw text wins,
    /// so trailing or leading noise around a valid name is ignored.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        if raw.is_empty() {
            return Err(InputError::MissingAppId);
        }

        id_query_param(raw)
            .and_then(|param| first_match(&param))
            .or_else(|| first_match(raw))
            .ok_or(InputError::InvalidAppId)
    }

    /// The package name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AppId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn first_match(text: &str) -> Option<AppId> {
    APP_ID_REGEX
        .find(text)
        .map(|m| AppId(m.as_str().to_string()))
}

/// Value of the first non-empty `id` parameter in the query part of `raw`
fn id_query_param(raw: &str) -> Option<String> {
    let (_, query) = raw.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == "id" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_package_name() {
        let id = AppId::parse("org.mozilla.firefox").unwrap();
        assert_eq!(id.as_str(), "org.mozilla.firefox");
    }

    #[test]
    fn test_empty_is_missing() {
        assert_eq!(AppId::parse(""), Err(InputError::MissingAppId));
    }

    #[test]
    fn test_no_match_is_invalid() {
        assert_eq!(AppId::parse("???"), Err(InputError::InvalidAppId));
        assert_eq!(AppId::parse("firefox"), Err(InputError::InvalidAppId));
    }

    #[test]
    fn test_listing_url_resolves_to_id_param() {
        let id = AppId::parse(
            "https://play.google.com/store/apps/details?id=org.mozilla.firefox&hl=en",
        )
        .unwrap();
        assert_eq!(id.as_str(), "org.mozilla.firefox");
    }

    #[test]
    fn test_surrounding_noise_is_ignored() {
        let id = AppId::parse("  com.example.app/extra!").unwrap();
        assert_eq!(id.as_str(), "com.example.app");

        let id = AppId::parse("<<com.example_2.app>>").unwrap();
        assert_eq!(id.as_str(), "com.example_2.app");
    }

    #[test]
    fn test_query_without_id_falls_back_to_pattern() {
        let id = AppId::parse("com.example.app?hl=en").unwrap();
        assert_eq!(id.as_str(), "com.example.app");
    }

    #[test]
    fn test_unmatched_id_param_falls_back_to_raw_text() {
        let id = AppId::parse("org.mozilla.firefox?id=abc").unwrap();
        assert_eq!(id.as_str(), "org.mozilla.firefox");

        assert_eq!(AppId::parse("nothing?id=abc"), Err(InputError::InvalidAppId));
    }

    #[test]
    fn test_display() {
        let id = AppId::parse("com.example.app").unwrap();
        assert_eq!(id.to_string(), "com.example.app");
    }
}
