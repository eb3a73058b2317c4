//! Request handlers
//!
//! Paths are routed by prefix, so `/play`, `/play.json` and `/playground`
//! all reach the badge handler, and everything that is neither a badge nor
//! a favicon request gets the index page.

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use playbadge_core::{
    substitute, truncate_chars, AppId, BadgeResponse, Locale, PlayStoreRecord, PLACEHOLDERS,
};
use tracing::{debug, error, info, warn};

use crate::query::QueryParams;
use crate::state::AppState;
use crate::template::{render, TemplateContext, EMBEDDED_TEMPLATE};

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// `cacheSeconds` reported by the stats badge
const STATS_CACHE_SECONDS: u32 = 60;

/// Route a request by path prefix
pub async fn dispatch(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path();
    let query = QueryParams::parse(uri.query());

    if path.starts_with("/play") {
        json_response(&badge(&state, &query).await)
    } else if path.starts_with("/favicon") {
        favicon(&state)
    } else {
        index(&state, &query).await
    }
}

/// Build the badge for a `/play` request.
///
/// Every failure becomes an error badge; consumers always get a badge.
pub async fn badge(state: &AppState, query: &QueryParams) -> BadgeResponse {
    let app_id = match AppId::parse(query.first_of(&["i", "id"]).unwrap_or_default()) {
        Ok(app_id) => app_id,
        Err(e) => {
            debug!(error = %e, "rejected badge request");
            return BadgeResponse::error(e.to_string());
        }
    };

    let locale = Locale::new(
        query.get("hl").map(str::to_string),
        query.get("gl").map(str::to_string),
    );

    let record = match state.scraper.extract(&app_id, &locale).await {
        Ok(record) => record,
        Err(e) => {
            warn!(package = %app_id, error = %e, "listing extraction failed");
            return BadgeResponse::error(e.to_string());
        }
    };

    let config = &state.config.badge;
    let label = query.first_of(&["l", "label"]).unwrap_or(&config.default_label);
    let message = query
        .first_of(&["m", "message"])
        .unwrap_or(&config.default_message);

    info!(package = %app_id, version = %record.version, "badge served");
    BadgeResponse::success(
        fill(label, config.max_text_len, &record),
        fill(message, config.max_text_len, &record),
        config.cache_seconds,
    )
}

fn fill(template: &str, max_len: usize, record: &PlayStoreRecord) -> String {
    substitute(truncate_chars(template, max_len), record)
}

/// Permanent redirect to the configured icon
pub fn favicon(state: &AppState) -> Response {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, state.config.site.favicon_url.clone())],
    )
        .into_response()
}

/// Render the index page with the query pre-filled
pub async fn index(state: &AppState, query: &QueryParams) -> Response {
    let site = &state.config.site;
    let ctx = TemplateContext::new()
        .var("appid", query.first_of_or(&["i", "id"], &site.default_appid))
        .var("label", query.first_of_or(&["l", "label"], &site.default_label))
        .var("message", query.first_of_or(&["m", "message"], &site.default_message))
        .var("displayLanguage", query.first_of_or(&["hl"], ""))
        .var("country", query.first_of_or(&["gl"], ""))
        .table(
            "placeHolders",
            PLACEHOLDERS.iter().map(|p| (p.token, p.description)),
        );

    let template = load_template(state).await;
    (
        [(header::CONTENT_TYPE, HTML_CONTENT_TYPE)],
        render(&template, &ctx),
    )
        .into_response()
}

/// The remote template when configured and reachable, else the embedded one
async fn load_template(state: &AppState) -> String {
    let Some(url) = &state.config.site.template_url else {
        return EMBEDDED_TEMPLATE.to_string();
    };

    match state.scraper.fetcher().fetch(url).await {
        Ok(template) => template,
        Err(e) => {
            warn!(url = %url, error = %e, "template fetch failed, using embedded template");
            EMBEDDED_TEMPLATE.to_string()
        }
    }
}

/// Cache occupancy as a badge
pub async fn stats(State(state): State<AppState>) -> Response {
    let message = match state.cache().entry_count().await {
        Some(count) => format!("{} cached pages", count),
        None => "cache disabled".to_string(),
    };
    json_response(&BadgeResponse::success(
        "Status",
        message,
        STATS_CACHE_SECONDS,
    ))
}

fn json_response(body: &BadgeResponse) -> Response {
    match serde_json::to_string(body) {
        Ok(json) => ([(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], json).into_response(),
        Err(e) => {
            error!(error = %e, "failed to serialize badge");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
