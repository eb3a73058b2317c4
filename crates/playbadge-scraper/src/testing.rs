//! Listing page fixtures for tests

use playbadge_core::PlayStoreRecord;
use playbadge_fetch::{FetchError, PageSource};
use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::google_play::CALLBACK_MARKER;

/// Length of the details array in the fixture
const DETAILS_LEN: usize = 146;

/// Listing page for `package` shaped like the live store page.
///
/// A decoy block without the package comes first.
pub fn listing_html(package: &str) -> String {
    let mut details = vec![Value::Null; DETAILS_LEN];
    details[0] = json!("Firefox Fast & Private Browser");
    details[9] = json!(["Rated for 12+"]);
    details[10] = json!(["Jun 23, 2010"]);
    details[13] = json!(["100,000,000+", 100000000, 123456789, "100M+"]);
    details[51] = json!([["4.5", 4.4860153]]);
    details[77] = json!([package]);
    details[140] = json!([
        ["131.0.2"],
        [[[34, "Android 14"]], [[[21, "Android 5.0"]]]]
    ]);
    details[145] = json!([["Oct 15, 2024", [1729000000, 0]]]);

    let data = json!([null, [null, null, details]]);

    format!(
        concat!(
            "<!doctype html><html><head><title>Play</title></head><body>",
            "<script nonce=\"abc\">{marker}key: 'ds:3', hash: '2', data:[[\"ads\"],null], sideChannel: {{}}}});</script>",
            "<script nonce=\"abc\">{marker}key: 'ds:5', hash: '7', data:{data}, sideChannel: {{}}}});</script>",
            "</body></html>"
        ),
        marker = CALLBACK_MARKER,
        data = data,
    )
}

/// The record [`listing_html`] extracts to
pub fn expected_record() -> PlayStoreRecord {
    PlayStoreRecord {
        name: "Firefox Fast & Private Browser".to_string(),
        installs: "100,000,000+".to_string(),
        totalinstalls: "123,456,789".to_string(),
        shortinstalls: "100M+".to_string(),
        version: "131.0.2".to_string(),
        updated: "Oct 15, 2024".to_string(),
        targetsdk: "34".to_string(),
        targetandroid: "Android 14".to_string(),
        minsdk: "21".to_string(),
        android: "Android 5.0".to_string(),
        rating: "4.5".to_string(),
        floatrating: "4.4860153".to_string(),
        friendly: "Rated for 12+".to_string(),
        published: "Jun 23, 2010".to_string(),
    }
}

/// Page source serving a canned body and recording requested URLs
pub struct FixtureSource {
    response: std::result::Result<String, String>,
    requested: Mutex<Vec<String>>,
}

impl FixtureSource {
    /// Serve `body` for every URL
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            response: Ok(body.into()),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Serve the fixture listing for `package`
    pub fn listing(package: &str) -> Self {
        Self::new(listing_html(package))
    }

    /// Answer every request with an upstream `status` error
    pub fn failing(status: impl Into<String>) -> Self {
        Self {
            response: Err(status.into()),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// URLs requested so far, in order
    pub async fn requested(&self) -> Vec<String> {
        self.requested.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl PageSource for FixtureSource {
    async fn fetch_text(&self, url: &str) -> playbadge_fetch::Result<String> {
        self.requested.lock().await.push(url.to_string());
        match &self.response {
            Ok(body) => Ok(body.clone()),
            Err(status) => Err(FetchError::Status {
                status: status.clone(),
                url: url.to_string(),
            }),
        }
    }
}
