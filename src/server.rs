use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::engine::Autocomplete;

/// Fields are loosely typed: a non-string prefix or a non-numeric limit
/// is treated as absent rather than rejected. A float limit is truncated
/// and then clamped like an integer one.
#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    #[serde(default = "empty_prefix")]
    pub prefix: Value,
    #[serde(default)]
    pub context: Value,
    #[serde(default)]
    pub limit: Value,
}

fn empty_prefix() -> Value {
    Value::String(String::new())
}

/// `f64 as i64` saturates, so `1e20` lands on the cap rather than the default.
fn requested_limit(limit: &Value) -> Option<i64> {
    limit.as_i64().or_else(|| limit.as_f64().map(|f| f as i64))
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<String>,
    /// The request's prefix, echoed as sent.
    pub prefix: Value,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Autocomplete>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(engine: Autocomplete, config: Config) -> Self {
        Self {
            engine: Arc::new(engine),
            config: Arc::new(config),
        }
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/api/autocomplete/words", post(autocomplete_words))
        .with_state(state)
}

async fn autocomplete_words(
    State(state): State<AppState>,
    Json(req): Json<SuggestRequest>,
) -> Response {
    let prefix = req.prefix.as_str().unwrap_or_default().to_string();
    let context = req.context.as_str().map(str::to_string);
    let limit = state.config.clamp_limit(requested_limit(&req.limit));
    debug!(%prefix, ?context, limit, "autocomplete request");

    // The first query may build the lexicon, which reads from disk
    let engine = Arc::clone(&state.engine);
    let ranked =
        tokio::task::spawn_blocking(move || engine.suggest(&prefix, context.as_deref(), limit))
            .await;

    match ranked {
        Ok(suggestions) => Json(SuggestResponse {
            suggestions,
            prefix: req.prefix,
        })
        .into_response(),
        Err(e) => {
            error!(error = %e, "suggestion task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "suggestion task failed" })),
            )
                .into_response()
        }
    }
}

/// Bind `config.bind`, build the lexicon in the background and serve until Ctrl-C.
pub async fn serve(state: AppState) -> Result<()> {
    let bind = state.config.bind.clone();
    let listener = TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind autocomplete server at {bind}"))?;
    info!("server running at http://{}", listener.local_addr()?);

    let engine = Arc::clone(&state.engine);
    tokio::task::spawn_blocking(move || {
        let lexicon = engine.warm();
        info!(words = lexicon.len(), "lexicon ready");
    });

    axum::serve(listener, app_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("autocomplete server failed")
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::Request,
    };
    use tower::util::ServiceExt;

    use super::*;
    use crate::lexicon::LexiconBuilder;
    use crate::sources::{StaticFrequencies, StaticWords};

    fn router() -> Router {
        let builder = LexiconBuilder::new()
            .word_source(StaticWords::new(
                "w",
                ["program", "project", "promise", "remark", "read", "ready", "rebate"],
            ))
            .frequency_source(StaticFrequencies::new(
                "f",
                [("program", 40u64), ("product", 10), ("read", 20)],
            ));
        let state = AppState::new(Autocomplete::new(builder), Config::default());
        app_router(state)
    }

    fn json_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/autocomplete/words")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("json body")))
            .expect("request")
    }

    async fn post_words(body: Value) -> (StatusCode, Value) {
        let response = router()
            .oneshot(json_request(body))
            .await
            .expect("router response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn returns_ranked_suggestions_and_echoes_prefix() {
        let (status, body) = post_words(json!({ "prefix": "Pro", "context": "the", "limit": 3 })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prefix"], "Pro");
        let suggestions = body["suggestions"].as_array().expect("array");
        assert_eq!(suggestions.len(), 3);
        assert_eq!(suggestions[0], "product");
    }

    #[tokio::test]
    async fn limit_defaults_and_clamps() {
        // 18 words start with "re" across the fixture and the domain vocabulary
        let (_, body) = post_words(json!({ "prefix": "re" })).await;
        assert_eq!(body["suggestions"].as_array().expect("array").len(), 8);

        let (_, body) = post_words(json!({ "prefix": "re", "limit": 500 })).await;
        assert_eq!(body["suggestions"].as_array().expect("array").len(), 15);

        let (_, body) = post_words(json!({ "prefix": "re", "limit": -2 })).await;
        assert_eq!(body["suggestions"], json!([]));
    }

    #[tokio::test]
    async fn float_limits_are_clamped_not_defaulted() {
        let (_, body) = post_words(json!({ "prefix": "re", "limit": 3.0 })).await;
        assert_eq!(body["suggestions"].as_array().expect("array").len(), 3);

        let (_, body) = post_words(json!({ "prefix": "re", "limit": 1e20 })).await;
        assert_eq!(body["suggestions"].as_array().expect("array").len(), 15);

        let (_, body) = post_words(json!({ "prefix": "re", "limit": 18446744073709551615u64 })).await;
        assert_eq!(body["suggestions"].as_array().expect("array").len(), 15);
    }

    #[tokio::test]
    async fn short_or_missing_prefix_is_empty_not_error() {
        let (status, body) = post_words(json!({ "prefix": "r" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "suggestions": [], "prefix": "r" }));

        let (status, body) = post_words(json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "suggestions": [], "prefix": "" }));
    }

    #[tokio::test]
    async fn non_string_prefix_is_empty_not_error() {
        let (status, body) = post_words(json!({ "prefix": 42, "context": 7, "limit": "many" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "suggestions": [], "prefix": 42 }));
    }

    #[tokio::test]
    async fn invalid_json_is_rejected() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/autocomplete/words")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .expect("request"),
            )
            .await
            .expect("router response");
        assert!(response.status().is_client_error());
    }
}
