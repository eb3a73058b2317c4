//! Shared data model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value used for every field the listing page does not provide
pub const FALLBACK_VALUE: &str = "Varies with device";

/// Optional locale forwarded to the listing page as `hl`/`gl`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    /// Interface language (`hl`)
    pub display_language: Option<String>,

    /// Store country (`gl`)
    pub country: Option<String>,
}

impl Locale {
    /// Build a locale, treating empty strings as absent
    pub fn new(display_language: Option<String>, country: Option<String>) -> Self {
        Self {
            display_language: display_language.filter(|s| !s.is_empty()),
            country: country.filter(|s| !s.is_empty()),
        }
    }

    /// Query parameters in upstream order, only those that are set
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(hl) = &self.display_language {
            pairs.push(("hl", hl.as_str()));
        }
        if let Some(gl) = &self.country {
            pairs.push(("gl", gl.as_str()));
        }
        pairs
    }
}

/// A field of [`PlayStoreRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Installs,
    TotalInstalls,
    ShortInstalls,
    Version,
    Updated,
    TargetSdk,
    TargetAndroid,
    MinSdk,
    Android,
    Rating,
    FloatRating,
    Friendly,
    Published,
}

impl Field {
    /// Every field, in record order
    pub const ALL: [Field; 14] = [
        Field::Name,
        Field::Installs,
        Field::TotalInstalls,
        Field::ShortInstalls,
        Field::Version,
        Field::Updated,
        Field::TargetSdk,
        Field::TargetAndroid,
        Field::MinSdk,
        Field::Android,
        Field::Rating,
        Field::FloatRating,
        Field::Friendly,
        Field::Published,
    ];

    /// Record key, e.g. `totalinstalls`
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Installs => "installs",
            Field::TotalInstalls => "totalinstalls",
            Field::ShortInstalls => "shortinstalls",
            Field::Version => "version",
            Field::Updated => "updated",
            Field::TargetSdk => "targetsdk",
            Field::TargetAndroid => "targetandroid",
            Field::MinSdk => "minsdk",
            Field::Android => "android",
            Field::Rating => "rating",
            Field::FloatRating => "floatrating",
            Field::Friendly => "friendly",
            Field::Published => "published",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Flat projection of one listing page.
///
/// Every field is always present; missing data reads as [`FALLBACK_VALUE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayStoreRecord {
    pub name: String,
    pub installs: String,
    pub totalinstalls: String,
    pub shortinstalls: String,
    pub version: String,
    pub updated: String,
    pub targetsdk: String,
    pub targetandroid: String,
    pub minsdk: String,
    pub android: String,
    pub rating: String,
    pub floatrating: String,
    pub friendly: String,
    pub published: String,
}

impl PlayStoreRecord {
    /// Build a record by asking `value_of` for every field
    pub fn from_fields(mut value_of: impl FnMut(Field) -> String) -> Self {
        Self {
            name: value_of(Field::Name),
            installs: value_of(Field::Installs),
            totalinstalls: value_of(Field::TotalInstalls),
            shortinstalls: value_of(Field::ShortInstalls),
            version: value_of(Field::Version),
            updated: value_of(Field::Updated),
            targetsdk: value_of(Field::TargetSdk),
            targetandroid: value_of(Field::TargetAndroid),
            minsdk: value_of(Field::MinSdk),
            android: value_of(Field::Android),
            rating: value_of(Field::Rating),
            floatrating: value_of(Field::FloatRating),
            friendly: value_of(Field::Friendly),
            published: value_of(Field::Published),
        }
    }

    /// A record where every field is the fallback value
    pub fn fallback() -> Self {
        Self::from_fields(|_| FALLBACK_VALUE.to_string())
    }

    /// Value of a single field
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Installs => &self.installs,
            Field::TotalInstalls => &self.totalinstalls,
            Field::ShortInstalls => &self.shortinstalls,
            Field::Version => &self.version,
            Field::Updated => &self.updated,
            Field::TargetSdk => &self.targetsdk,
            Field::TargetAndroid => &self.targetandroid,
            Field::MinSdk => &self.minsdk,
            Field::Android => &self.android,
            Field::Rating => &self.rating,
            Field::FloatRating => &self.floatrating,
            Field::Friendly => &self.friendly,
            Field::Published => &self.published,
        }
    }
}

/// JSON document consumed by the shields.io endpoint badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeResponse {
    pub schema_version: u8,
    pub label: String,
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_seconds: Option<u32>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl BadgeResponse {
    /// Successful badge
    pub fn success(
        label: impl Into<String>,
        message: impl Into<String>,
        cache_seconds: u32,
    ) -> Self {
        Self {
            schema_version: 1,
            label: label.into(),
            message: message.into(),
            cache_seconds: Some(cache_seconds),
            is_error: false,
        }
    }

    /// Error badge; consumers still receive it with HTTP 200
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            schema_version: 1,
            label: "error".to_string(),
            message: message.into(),
            cache_seconds: None,
            is_error: true,
        }
    }
}
