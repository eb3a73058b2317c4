//! playbadge core - shared types for the Play Store badge service
//!
//! This crate provides the data model, error handling, configuration and
//! placeholder table used by the fetch, scraper and server crates.

pub mod app_id;
pub mod config;
pub mod error;
pub mod placeholders;
pub mod types;

pub use app_id::AppId;
pub use config::Config;
pub use error::{ConfigError, InputError, PlayBadgeError, Result};
pub use placeholders::{substitute, truncate_chars, Placeholder, PLACEHOLDERS};
pub use types::{BadgeResponse, Field, Locale, PlayStoreRecord, FALLBACK_VALUE};
