//! Google Play listing page scraper
//!
//! Fetches the public listing page of an app and projects the data blob
//! embedded in its script tags onto a [`PlayStoreRecord`].
//!
//! ## Usage
//!
//! ```ignore
//! use playbadge_scraper::google_play::GooglePlayScraper;
//!
//! let scraper = GooglePlayScraper::new(fetcher, &config.upstream.listing_url);
//! let record = scraper.extract(&app_id, &Locale::default()).await?;
//! println!("{}", record.version);
//! ```

pub mod projection;
pub mod segment;

use playbadge_core::{AppId, Locale, PlayStoreRecord};
use playbadge_fetch::CachedFetcher;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ExtractionError, Result};

pub use projection::{project_record, FIELD_PATHS};
pub use segment::{carve_data_blob, CALLBACK_MARKER};

/// Listing page scraper
#[derive(Debug, Clone)]
pub struct GooglePlayScraper {
    /// Page fetcher, usually cache-backed
    fetcher: CachedFetcher,

    /// Listing URL prefix the package name is appended to
    listing_url: String,
}

impl GooglePlayScraper {
    /// Create a scraper fetching pages below `listing_url`
    pub fn new(fetcher: CachedFetcher, listing_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            listing_url: listing_url.into(),
        }
    }

    /// The fetcher used for listing pages
    pub fn fetcher(&self) -> &CachedFetcher {
        &self.fetcher
    }

    /// Upstream URL for a package, with `hl`/`gl` only when set.
    ///
    /// This is also the cache key, so different locales cache separately.
    pub fn listing_url(&self, app_id: &AppId, locale: &Locale) -> String {
        let mut url = self.listing_url.clone();
        url.extend(url::form_urlencoded::byte_serialize(app_id.as_str().as_bytes()));
        for (key, value) in locale.query_pairs() {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.extend(url::form_urlencoded::byte_serialize(value.as_bytes()));
        }
        url
    }

    /// Fetch and extract the record for `app_id`
    pub async fn extract(&self, app_id: &AppId, locale: &Locale) -> Result<PlayStoreRecord> {
        let url = self.listing_url(app_id, locale);
        info!(package = %app_id, url = %url, "extracting listing");

        let html = self.fetcher.fetch(&url).await?;
        parse_listing(&html, app_id.as_str())
    }
}

/// Extract the record for `package` from listing page HTML
pub fn parse_listing(html: &str, package: &str) -> Result<PlayStoreRecord> {
    let blob = carve_data_blob(html, package)?;
    debug!(package, bytes = blob.len(), "parsing embedded data");

    let data: Value = serde_json::from_str(blob)?;
    if !data.is_array() {
        return Err(ExtractionError::NotAnArray);
    }

    Ok(project_record(&data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{expected_record, listing_html, FixtureSource};
    use playbadge_core::FALLBACK_VALUE;
    use playbadge_fetch::{FetchError, MemoryCache, NoopCache};
    use std::sync::Arc;
    use std::time::Duration;

    const PACKAGE: &str = "org.mozilla.firefox";
    const LISTING_URL: &str = "https://play.google.com/store/apps/details?id=";

    fn scraper(source: Arc<FixtureSource>) -> GooglePlayScraper {
        let fetcher = CachedFetcher::new(source, Arc::new(NoopCache), Duration::from_secs(60));
        GooglePlayScraper::new(fetcher, LISTING_URL)
    }

    fn app_id() -> AppId {
        AppId::parse(PACKAGE).unwrap()
    }

    #[test]
    fn test_listing_url_without_locale() {
        let scraper = scraper(Arc::new(FixtureSource::listing(PACKAGE)));
        assert_eq!(
            scraper.listing_url(&app_id(), &Locale::default()),
            "https://play.google.com/store/apps/details?id=org.mozilla.firefox"
        );
    }

    #[test]
    fn test_listing_url_with_locale() {
        let scraper = scraper(Arc::new(FixtureSource::listing(PACKAGE)));
        let both = Locale::new(Some("de".to_string()), Some("AT".to_string()));
        assert_eq!(
            scraper.listing_url(&app_id(), &both),
            "https://play.google.com/store/apps/details?id=org.mozilla.firefox&hl=de&gl=AT"
        );

        let country_only = Locale::new(None, Some("US".to_string()));
        assert_eq!(
            scraper.listing_url(&app_id(), &country_only),
            "https://play.google.com/store/apps/details?id=org.mozilla.firefox&gl=US"
        );
    }

    #[test]
    fn test_parse_listing_fixture() {
        let record = parse_listing(&listing_html(PACKAGE), PACKAGE).unwrap();
        assert_eq!(record, expected_record());
    }

    #[test]
    fn test_parse_listing_exact_values() {
        let record = parse_listing(&listing_html(PACKAGE), PACKAGE).unwrap();
        assert_eq!(record.name, "Firefox Fast & Private Browser");
        assert_eq!(record.installs, "100,000,000+");
        assert_eq!(record.totalinstalls, "123,456,789");
        assert_eq!(record.shortinstalls, "100M+");
        assert_eq!(record.version, "131.0.2");
        assert_eq!(record.updated, "Oct 15, 2024");
        assert_eq!(record.targetsdk, "34");
        assert_eq!(record.targetandroid, "Android 14");
        assert_eq!(record.minsdk, "21");
        assert_eq!(record.android, "Android 5.0");
        assert_eq!(record.rating, "4.5");
        assert_eq!(record.floatrating, "4.4860153");
        assert_eq!(record.friendly, "Rated for 12+");
        assert_eq!(record.published, "Jun 23, 2010");
    }

    #[test]
    fn test_parse_listing_sparse_data_uses_fallbacks() {
        let html = format!(
            "<script>{}key: 'ds:5', data:[null,[[\"{}\"],null,[\"Only a name\"]]], sideChannel: {{}}}});</script>",
            CALLBACK_MARKER, PACKAGE
        );
        let record = parse_listing(&html, PACKAGE).unwrap();
        assert_eq!(record.name, "Only a name");
        assert_eq!(record.version, FALLBACK_VALUE);
        assert_eq!(record.rating, FALLBACK_VALUE);
    }

    #[test]
    fn test_parse_listing_missing_marker() {
        let err = parse_listing("<html><body>Not found</body></html>", PACKAGE).unwrap_err();
        assert!(matches!(err, ExtractionError::NoCallbackBlocks));
    }

    #[test]
    fn test_parse_listing_malformed_json() {
        let html = format!(
            "<script>{}key: 'ds:5', data:[[\"{}\"], oops], sideChannel: {{}}}});</script>",
            CALLBACK_MARKER, PACKAGE
        );
        let err = parse_listing(&html, PACKAGE).unwrap_err();
        assert!(matches!(err, ExtractionError::MalformedData(_)));
        assert!(err.to_string().starts_with("embedded data is not valid JSON"));
    }

    #[test]
    fn test_parse_listing_object_is_rejected() {
        let html = format!(
            "<script>{}key: 'ds:5', data:{{\"a\": [\"{}\"], \"b\": 1}}, sideChannel: {{}}}});</script>",
            CALLBACK_MARKER, PACKAGE
        );
        assert!(matches!(
            parse_listing(&html, PACKAGE),
            Err(ExtractionError::NotAnArray)
        ));
    }

    #[tokio::test]
    async fn test_extract_fetches_listing_url() {
        let source = Arc::new(FixtureSource::listing(PACKAGE));
        let scraper = scraper(source.clone());

        let record = scraper.extract(&app_id(), &Locale::default()).await.unwrap();
        assert_eq!(record.version, "131.0.2");
        assert_eq!(
            source.requested().await,
            vec![format!("{}{}", LISTING_URL, PACKAGE)]
        );
    }

    #[tokio::test]
    async fn test_extract_uses_cache_on_second_call() {
        let source = Arc::new(FixtureSource::listing(PACKAGE));
        let fetcher = CachedFetcher::new(
            source.clone(),
            Arc::new(MemoryCache::new(10)),
            Duration::from_secs(60),
        );
        let scraper = GooglePlayScraper::new(fetcher, LISTING_URL);

        scraper.extract(&app_id(), &Locale::default()).await.unwrap();
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        scraper.extract(&app_id(), &Locale::default()).await.unwrap();

        assert_eq!(source.requested().await.len(), 1);
    }

    #[tokio::test]
    async fn test_extract_surfaces_fetch_failure() {
        let scraper = scraper(Arc::new(FixtureSource::failing("503 Service Unavailable")));
        let err = scraper
            .extract(&app_id(), &Locale::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Fetch(FetchError::Status { .. })));
        assert!(err.to_string().contains("503 Service Unavailable"));
    }
}
