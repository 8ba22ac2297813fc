use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::middleware::request_id::RequestId;
use crate::models::MovieResponse;

use super::{state::RecommendationLimits, AppState};

// Request types

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    /// Catalog title, surrounding whitespace is ignored
    #[serde(default)]
    pub movie: Option<Value>,
    /// "title" or "genre", defaults to "title" only when the key is absent
    #[serde(default, deserialize_with = "present")]
    pub mode: Option<Value>,
    /// Requested result count, accepted in any JSON shape and coerced
    #[serde(default)]
    pub number: Option<Value>,
}

/// Keeps an explicit `null` as `Some(Value::Null)` so it differs from a missing key
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

const DEFAULT_MODE: &str = "title";

/// Reads the requested title, rendering non-string scalars as their JSON text
pub fn resolve_title(raw: Option<&Value>) -> String {
    match raw {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string(),
    }
}

/// Reads the requested mode
///
/// Strings pass through unchanged. Any other value, `null` included, becomes
/// its JSON text and is later rejected as an invalid mode.
pub fn resolve_mode(raw: Option<&Value>) -> String {
    match raw {
        None => DEFAULT_MODE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Coerces the requested result count into `1..=max`
///
/// Integers, floats (truncated) and numeric strings are clamped. Anything else
/// falls back to the configured default.
pub fn resolve_count(raw: Option<&Value>, limits: RecommendationLimits) -> usize {
    let max = limits.max.max(1);
    let requested = match raw {
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    match requested {
        Some(n) => n.clamp(1, i64::try_from(max).unwrap_or(i64::MAX)) as usize,
        None => limits.default.clamp(1, max),
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Lists every distinct catalog title for autocomplete
pub async fn list_movies(State(state): State<AppState>) -> Json<Vec<String>> {
    let titles: Vec<String> = state
        .engine
        .catalog()
        .titles()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(titles)
}

/// Recommends movies similar to the requested one
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> AppResult<Json<Vec<MovieResponse>>> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(request_id = %request_id, error = %rejection, "Malformed request body");
        rejection
    })?;

    let title = resolve_title(request.movie.as_ref());
    let mode = resolve_mode(request.mode.as_ref());
    let count = resolve_count(request.number.as_ref(), state.limits);

    tracing::info!(
        request_id = %request_id,
        title = %title,
        mode = %mode,
        count,
        "Processing recommendation request"
    );

    let movies = state.engine.recommend(&title, count, &mode).map_err(|e| {
        tracing::warn!(request_id = %request_id, error = %e, "Recommendation rejected");
        e
    })?;

    Ok(Json(movies.into_iter().map(MovieResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: RecommendationLimits = RecommendationLimits { default: 5, max: 20 };

    fn body(value: Value) -> RecommendRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_mode_defaults_to_title() {
        let request = body(json!({ "movie": "Heat" }));
        assert_eq!(request.mode, None);
        assert_eq!(resolve_mode(request.mode.as_ref()), "title");
    }

    #[test]
    fn test_null_mode_is_kept_distinct() {
        let request = body(json!({ "movie": "Heat", "mode": null }));
        assert_eq!(request.mode, Some(Value::Null));
        assert_eq!(resolve_mode(request.mode.as_ref()), "null");
    }

    #[test]
    fn test_non_string_mode_uses_json_text() {
        let request = body(json!({ "movie": "Heat", "mode": 5 }));
        assert_eq!(resolve_mode(request.mode.as_ref()), "5");

        let request = body(json!({ "movie": "Heat", "mode": "genre" }));
        assert_eq!(resolve_mode(request.mode.as_ref()), "genre");
    }

    #[test]
    fn test_resolve_title() {
        assert_eq!(resolve_title(Some(&json!("  Heat "))), "Heat");
        assert_eq!(resolve_title(Some(&json!(42))), "42");
        assert_eq!(resolve_title(Some(&json!(null))), "");
        assert_eq!(resolve_title(None), "");
    }

    #[test]
    fn test_resolve_count_clamps_integers() {
        assert_eq!(resolve_count(Some(&json!(7)), LIMITS), 7);
        assert_eq!(resolve_count(Some(&json!(0)), LIMITS), 1);
        assert_eq!(resolve_count(Some(&json!(-3)), LIMITS), 1);
        assert_eq!(resolve_count(Some(&json!(500)), LIMITS), 20);
        assert_eq!(resolve_count(Some(&json!(u64::MAX)), LIMITS), 20);
    }

    #[test]
    fn test_resolve_count_accepts_floats_and_strings() {
        assert_eq!(resolve_count(Some(&json!(3.9)), LIMITS), 3);
        assert_eq!(resolve_count(Some(&json!("12")), LIMITS), 12);
        assert_eq!(resolve_count(Some(&json!(" 4 ")), LIMITS), 4);
    }

    #[test]
    fn test_resolve_count_falls_back_to_default() {
        assert_eq!(resolve_count(None, LIMITS), 5);
        assert_eq!(resolve_count(Some(&json!("many")), LIMITS), 5);
        assert_eq!(resolve_count(Some(&json!("2.5")), LIMITS), 5);
        assert_eq!(resolve_count(Some(&json!(null)), LIMITS), 5);
        assert_eq!(resolve_count(Some(&json!([3])), LIMITS), 5);
        assert_eq!(resolve_count(Some(&json!(true)), LIMITS), 5);
    }

    #[test]
    fn test_resolve_count_default_respects_max() {
        let limits = RecommendationLimits { default: 5, max: 3 };
        assert_eq!(resolve_count(None, limits), 3);
    }
}
