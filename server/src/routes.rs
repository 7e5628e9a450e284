//! HTTP handlers.
//!
//! The extraction endpoints marshal the year range from request input with
//! per-parameter fallbacks and never answer 500 for an empty result: zero
//! events is a valid outcome and serializes as `[]`.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use chronos_extract::{ExtractError, extract_from_chapters};
use chronos_types::{TimelineEvent, YearRange};

use crate::AppState;
use crate::storage::{SearchRepo, Subscriber, WaitlistRepo};

type ApiError = (StatusCode, Json<ErrorBody>);

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

fn map_extract_error(err: ExtractError) -> ApiError {
    match err {
        ExtractError::InvalidRange { .. } => api_error(StatusCode::BAD_REQUEST, err.to_string()),
        _ => api_error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

// ── Health ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

// ── Historical data ──────────────────────────────────────────────────────

/// Pull the year window out of raw query params.
///
/// Missing or unparseable parameters fall back per side to the documented
/// defaults (1850 / 2025) rather than failing the request.
pub(crate) fn parse_range(params: &HashMap<String, String>) -> YearRange {
    let fallback = YearRange::default();
    let start = params
        .get("start")
        .and_then(|s| s.parse().ok())
        .unwrap_or(fallback.start);
    let end = params
        .get("end")
        .and_then(|s| s.parse().ok())
        .unwrap_or(fallback.end);
    YearRange::new(start, end)
}

/// `GET /api/historical-data?location=&start=&end=`
pub async fn historical_data(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<TimelineEvent>>, ApiError> {
    let range = parse_range(&params);
    let location = params.get("location").map(String::as_str);

    let events = extract_from_chapters(&state.chapters, range, location)
        .map_err(map_extract_error)?;

    tracing::info!(
        start = range.start,
        end = range.end,
        location = location.unwrap_or("-"),
        count = events.len(),
        "historical data extracted"
    );
    Ok(Json(events))
}

// ── Search ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub start: Option<u16>,
    pub end: Option<u16>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub timeline: Vec<TimelineEvent>,
}

/// `POST /api/search {query, start?, end?}`
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let fallback = YearRange::default();
    let range = YearRange::new(
        req.start.unwrap_or(fallback.start),
        req.end.unwrap_or(fallback.end),
    );

    if req.query.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "query must not be empty"));
    }

    let timeline = extract_from_chapters(&state.chapters, range, Some(&req.query))
        .map_err(map_extract_error)?;
    // Only successful extractions land in the search log.
    let record = state.storage.record_search(&req.query, range.start, range.end);

    tracing::info!(
        id = record.id,
        query = %req.query,
        count = timeline.len(),
        "search recorded"
    );
    Ok(Json(SearchResponse {
        query: req.query,
        timeline,
    }))
}

// ── Waitlist ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct WaitlistRequest {
    pub email: String,
}

/// `POST /api/waitlist {email}`
pub async fn waitlist(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WaitlistRequest>,
) -> Result<(StatusCode, Json<Subscriber>), ApiError> {
    let email = req.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(api_error(StatusCode::BAD_REQUEST, "invalid email"));
    }

    match state.storage.add_subscriber(email) {
        Some(subscriber) => {
            tracing::info!(email = %subscriber.email, "waitlist subscription");
            Ok((StatusCode::CREATED, Json(subscriber)))
        }
        None => Err(api_error(StatusCode::CONFLICT, "email already subscribed")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemStorage;
    use chronos_extract::ChapterSet;

    fn state() -> Arc<AppState> {
        Arc::new(AppState {
            chapters: ChapterSet::default(),
            storage: MemStorage::new(),
        })
    }

    #[tokio::test]
    async fn test_search_invalid_range_rejected_and_not_recorded() {
        let state = state();
        let req = SearchRequest {
            query: "Delhi".to_string(),
            start: Some(2000),
            end: Some(1800),
        };
        let (status, _) = search(State(state.clone()), Json(req)).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(state.storage.search_count(), 0);
    }

    #[tokio::test]
    async fn test_search_recorded_after_success() {
        let state = state();
        let req = SearchRequest {
            query: "Delhi".to_string(),
            start: None,
            end: None,
        };
        let response = search(State(state.clone()), Json(req)).await.unwrap();
        // Empty corpus: a valid search succeeds with an empty timeline.
        assert!(response.timeline.is_empty());
        assert_eq!(state.storage.search_count(), 1);
    }

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_range_defaults_when_missing() {
        let range = parse_range(&params(&[]));
        assert_eq!(range, YearRange::default());
    }

    #[test]
    fn test_parse_range_explicit() {
        let range = parse_range(&params(&[("start", "1700"), ("end", "1900")]));
        assert_eq!(range, YearRange::new(1700, 1900));
    }

    #[test]
    fn test_parse_range_malformed_falls_back_per_side() {
        let range = parse_range(&params(&[("start", "seventeen"), ("end", "1900")]));
        assert_eq!(range, YearRange::new(1850, 1900));
        let range = parse_range(&params(&[("start", "1700"), ("end", "99999")]));
        assert_eq!(range, YearRange::new(1700, 2025));
    }

    #[test]
    fn test_parse_range_can_still_be_inverted() {
        // The extraction call, not the parser, rejects inverted ranges.
        let range = parse_range(&params(&[("start", "2000"), ("end", "1800")]));
        assert!(!range.is_valid());
    }
}
