//! HTTP service for playbadge
//!
//! Serves shields.io endpoint badges built from Google Play listings.
//!
//! ## Routes
//!
//! - `GET /play*?i=<id>&l=<label>&m=<message>&hl=<lang>&gl=<country>`: badge JSON
//! - `GET /stats`: cache occupancy badge
//! - `GET /favicon*`: 301 to the configured icon
//! - anything else: the index page
//!
//! Badge failures are reported as error badges with status 200.

pub mod error;
pub mod handlers;
pub mod query;
pub mod state;
pub mod template;

use std::future::Future;

use axum::routing::get;
use axum::Router;
use tracing::{info, warn};

pub use error::{Result, ServerError};
pub use state::AppState;

/// Build the router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/stats", get(handlers::stats))
        .fallback(handlers::dispatch)
        .with_state(state)
}

/// Bind the configured address and serve until `shutdown` resolves
pub async fn serve<F>(state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let host = state.config.server.host.clone();
    let port = state.config.server.port;

    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .map_err(|source| ServerError::Bind {
            addr: format!("{}:{}", host, port),
            source,
        })?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl-C
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => warn!(error = %e, "failed to listen for Ctrl-C"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use playbadge_core::config::CacheBackendKind;
    use playbadge_core::Config;
    use playbadge_scraper::testing::FixtureSource;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    const PACKAGE: &str = "org.mozilla.firefox";

    fn app_with(source: Arc<FixtureSource>, config: Config) -> Router {
        router(AppState::with_source(config, source))
    }

    fn app(source: Arc<FixtureSource>) -> Router {
        app_with(source, Config::default())
    }

    async fn get_response(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn get_json(app: Router, uri: &str) -> Value {
        let response = get_response(app, uri).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json; charset=utf-8"
        );
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_badge_end_to_end() {
        let source = Arc::new(FixtureSource::listing(PACKAGE));
        let body = get_json(
            app(source.clone()),
            "/play?i=org.mozilla.firefox&l=Android&m=$version",
        )
        .await;

        assert_eq!(
            body,
            json!({
                "schemaVersion": 1,
                "label": "Android",
                "message": "131.0.2",
                "cacheSeconds": 3600
            })
        );
        assert_eq!(
            source.requested().await,
            vec!["https://play.google.com/store/apps/details?id=org.mozilla.firefox"]
        );
    }

    #[tokio::test]
    async fn test_badge_defaults() {
        let source = Arc::new(FixtureSource::listing(PACKAGE));
        let body = get_json(app(source), "/play?id=org.mozilla.firefox").await;
        assert_eq!(body["label"], "play");
        assert_eq!(body["message"], "131.0.2");
    }

    #[tokio::test]
    async fn test_badge_substitutes_first_occurrence_only() {
        let source = Arc::new(FixtureSource::listing(PACKAGE));
        let body = get_json(
            app(source),
            "/play?i=org.mozilla.firefox&l=$name&m=%24version%20%24version%20(%24targetandroid)",
        )
        .await;
        assert_eq!(body["label"], "Firefox Fast & Private Browser");
        assert_eq!(body["message"], "131.0.2 $version (Android 14)");
    }

    #[tokio::test]
    async fn test_badge_forwards_locale() {
        let source = Arc::new(FixtureSource::listing(PACKAGE));
        get_json(app(source.clone()), "/play?i=org.mozilla.firefox&hl=de&gl=AT").await;
        assert_eq!(
            source.requested().await,
            vec!["https://play.google.com/store/apps/details?id=org.mozilla.firefox&hl=de&gl=AT"]
        );
    }

    #[tokio::test]
    async fn test_badge_accepts_listing_url() {
        let source = Arc::new(FixtureSource::listing(PACKAGE));
        let body = get_json(
            app(source),
            "/play?i=https%3A%2F%2Fplay.google.com%2Fstore%2Fapps%2Fdetails%3Fid%3Dorg.mozilla.firefox%26hl%3Den",
        )
        .await;
        assert_eq!(body["message"], "131.0.2");
    }

    #[tokio::test]
    async fn test_badge_missing_app_id() {
        let source = Arc::new(FixtureSource::listing(PACKAGE));
        let body = get_json(app(source.clone()), "/play?l=x").await;
        assert_eq!(
            body,
            json!({
                "schemaVersion": 1,
                "label": "error",
                "message": "missing app id",
                "isError": true
            })
        );
        assert!(source.requested().await.is_empty());
    }

    #[tokio::test]
    async fn test_badge_invalid_app_id() {
        let source = Arc::new(FixtureSource::listing(PACKAGE));
        let body = get_json(app(source), "/play?i=%3F%3F%3F").await;
        assert_eq!(body["label"], "error");
        assert_eq!(body["message"], "invalid app id format");
        assert_eq!(body["isError"], true);
    }

    #[tokio::test]
    async fn test_badge_unknown_package() {
        let source = Arc::new(FixtureSource::listing(PACKAGE));
        let body = get_json(app(source), "/play?i=com.example.other").await;
        assert_eq!(body["isError"], true);
        assert_eq!(body["message"], "no embedded data found for com.example.other");
    }

    #[tokio::test]
    async fn test_badge_upstream_failure() {
        let source = Arc::new(FixtureSource::failing("404 Not Found"));
        let body = get_json(app(source), "/play?i=org.mozilla.firefox").await;
        assert_eq!(body["isError"], true);
        assert_eq!(
            body["message"],
            "upstream returned 404 Not Found for https://play.google.com/store/apps/details?id=org.mozilla.firefox"
        );
    }

    #[tokio::test]
    async fn test_badge_truncates_long_label() {
        let source = Arc::new(FixtureSource::listing(PACKAGE));
        let uri = format!("/play?i=org.mozilla.firefox&l={}", "a".repeat(1500));
        let body = get_json(app(source), &uri).await;
        assert_eq!(body["label"].as_str().unwrap().len(), 1000);
    }

    #[tokio::test]
    async fn test_badge_truncates_before_substitution() {
        let source = Arc::new(FixtureSource::listing(PACKAGE));
        let uri = format!("/play?i=org.mozilla.firefox&m={}%24version", "a".repeat(996));
        let body = get_json(app(source), &uri).await;
        assert_eq!(body["message"], format!("{}$ver", "a".repeat(996)));
    }

    #[tokio::test]
    async fn test_badge_truncates_by_characters() {
        let source = Arc::new(FixtureSource::listing(PACKAGE));
        let uri = format!("/play?i=org.mozilla.firefox&l={}", "%C3%A4".repeat(1200));
        let body = get_json(app(source), &uri).await;
        assert_eq!(body["label"], "ä".repeat(1000));
    }

    #[tokio::test]
    async fn test_favicon_redirect() {
        let source = Arc::new(FixtureSource::listing(PACKAGE));
        let response = get_response(app(source), "/favicon.ico").await;
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://cvzi.github.io/play/favicon.ico"
        );
    }

    #[tokio::test]
    async fn test_index_page() {
        let source = Arc::new(FixtureSource::listing(PACKAGE));
        let response = get_response(app(source.clone()), "/?i=com.example.app&l=%3Cb%3E").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );

        let html = body_text(response).await;
        assert!(html.contains("value=\"com.example.app\""));
        assert!(html.contains("value=\"&lt;b&gt;\""));
        assert!(html.contains("value=\"$version\""));
        assert!(html.contains("<code>$totalinstalls</code></td><td>Precise installs"));
        assert!(!html.contains("{{"));
        assert!(source.requested().await.is_empty());
    }

    #[tokio::test]
    async fn test_index_uses_remote_template() {
        let source = Arc::new(FixtureSource::new(
            "<p>{{ appid }}</p>{{items:placeHolders}}{{ $k }}{{end}}",
        ));
        let mut config = Config::default();
        config.site.template_url = Some("https://example.com/index.html".to_string());
        config.cache.backend = CacheBackendKind::None;

        let response = get_response(app_with(source.clone(), config), "/anything").await;
        let html = body_text(response).await;
        assert!(html.starts_with("<p>org.mozilla.firefox</p>$version\n$installs"));
        assert_eq!(
            source.requested().await,
            vec!["https://example.com/index.html"]
        );
    }

    #[tokio::test]
    async fn test_stats_counts_cached_pages() {
        let source = Arc::new(FixtureSource::listing(PACKAGE));
        let app = app(source);

        let body = get_json(app.clone(), "/stats").await;
        assert_eq!(body["message"], "0 cached pages");

        get_json(app.clone(), "/play?i=org.mozilla.firefox").await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        let body = get_json(app, "/stats").await;
        assert_eq!(
            body,
            json!({
                "schemaVersion": 1,
                "label": "Status",
                "message": "1 cached pages",
                "cacheSeconds": 60
            })
        );
    }

    #[tokio::test]
    async fn test_stats_without_cache() {
        let mut config = Config::default();
        config.cache.backend = CacheBackendKind::None;
        let source = Arc::new(FixtureSource::listing(PACKAGE));

        let body = get_json(app_with(source, config), "/stats").await;
        assert_eq!(body["message"], "cache disabled");
    }
}
