use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

use crate::config::Config;
use crate::extract::{self, ExtractionResult};
use crate::log;
use crate::prompt;
use crate::provider::DynProvider;
use crate::wire::{GenerateReply, TripRequest};

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<DynProvider>,
    pub cfg: Arc<Config>,
    pub debug: bool,
}

impl IntoResponse for GenerateReply {
    fn into_response(self) -> Response {
        // Extraction failure is an upstream-content problem, hence 502.
        let status = if self.success { StatusCode::OK } else { StatusCode::BAD_GATEWAY };
        (status, Json(self)).into_response()
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    Router::new()
        .route("/api/generate", post(generate))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

pub async fn serve(cfg: Config, provider: DynProvider, debug: bool) -> anyhow::Result<()> {
    let bind = cfg.bind.clone();
    let state = AppState { provider: Arc::new(provider), cfg: Arc::new(cfg), debug };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("bind {}", bind))?;
    println!("tripsmith API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn generate(
    State(state): State<AppState>,
    Json(trip): Json<TripRequest>,
) -> Response {
    if trip.validate().is_err() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "destination, days and budget are required" })),
        )
            .into_response();
    }

    let ins = prompt::build(&trip, prompt::itinerary_schema());
    let raw = match state.provider.generate(&ins, state.debug).await {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("generate: provider call failed: {e:#}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": "provider_error",
                    "message": e.to_string(),
                })),
            )
                .into_response();
        }
    };

    let reply = match extract::extract(&raw) {
        ExtractionResult::Parsed(v) => GenerateReply::parsed(raw, v),
        ExtractionResult::Failed(reason) => GenerateReply::failed(raw, reason),
    };

    if state.cfg.save_request || state.cfg.save_response {
        let tx = Uuid::new_v4();
        if let Err(e) = log::save_exchange(
            &trip,
            &ins,
            &reply.raw,
            reply.itinerary.as_ref(),
            tx,
            &state.cfg,
            state.cfg.save_request,
            state.cfg.save_response,
        ) {
            eprintln!("generate: failed to save tx artifacts: {e:#}");
        }
    }

    reply.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use tower::ServiceExt;

    use crate::provider::Provider;
    use crate::wire::Instruction;

    struct CannedProvider(Result<&'static str, &'static str>);

    #[async_trait::async_trait]
    impl Provider for CannedProvider {
        async fn generate(&self, _ins: &Instruction, _debug: bool) -> Result<String> {
            match self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(msg) => Err(anyhow!(msg)),
            }
        }
    }

    fn router_with(canned: Result<&'static str, &'static str>) -> Router {
        let cfg = Config {
            save_request: false,
            save_response: false,
            ..Config::default()
        };
        create_router(AppState {
            provider: Arc::new(Box::new(CannedProvider(canned))),
            cfg: Arc::new(cfg),
            debug: false,
        })
    }

    fn post_generate(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/generate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(resp: Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let resp = router_with(Ok("{}"))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn missing_required_fields_is_400() {
        let resp = router_with(Ok("{}"))
            .oneshot(post_generate(r#"{"destination": "Paris"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let v = body_json(resp).await;
        assert_eq!(v["error"], json!("destination, days and budget are required"));
    }

    #[tokio::test]
    async fn fenced_model_output_parses_to_200() {
        let resp = router_with(Ok("```json\n{\"title\":\"Paris Trip\",\"days\":[]}\n```"))
            .oneshot(post_generate(
                r#"{"destination":"Paris","days":3,"budget":"500 EUR"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let v = body_json(resp).await;
        assert_eq!(v["success"], json!(true));
        assert_eq!(v["itinerary"]["title"], json!("Paris Trip"));
    }

    #[tokio::test]
    async fn refusal_text_is_502_with_reason_and_raw() {
        let resp = router_with(Ok("Sorry, I cannot comply."))
            .oneshot(post_generate(
                r#"{"destination":"Paris","days":3,"budget":"500 EUR"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let v = body_json(resp).await;
        assert_eq!(v["success"], json!(false));
        assert_eq!(v["error"], json!("no_json_start_found"));
        assert_eq!(v["raw"], json!("Sorry, I cannot comply."));
    }

    #[tokio::test]
    async fn truncated_model_output_is_502_malformed() {
        let resp = router_with(Ok(r#"{"title":"Rome"#))
            .oneshot(post_generate(
                r#"{"destination":"Rome","days":2,"budget":"250 EUR"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let v = body_json(resp).await;
        assert_eq!(v["error"], json!("malformed_json"));
    }

    #[tokio::test]
    async fn provider_failure_is_500() {
        let resp = router_with(Err("upstream unreachable"))
            .oneshot(post_generate(
                r#"{"destination":"Rome","days":2,"budget":"250 EUR"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let v = body_json(resp).await;
        assert_eq!(v["error"], json!("provider_error"));
        assert_eq!(v["message"], json!("upstream unreachable"));
    }
}
