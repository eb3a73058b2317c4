//! Listing page extraction for playbadge
//!
//! Turns the public Google Play listing page of an app into a flat
//! [`PlayStoreRecord`](playbadge_core::PlayStoreRecord) of display strings.

pub mod error;
pub mod google_play;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use error::{ExtractionError, Result};
pub use google_play::{parse_listing, GooglePlayScraper};
