//! Router assembly: HTTP endpoints, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
  routing::{get, post},
  Router,
};
use tower_http::{
  cors::{Any, CorsLayer},
  services::{ServeDir, ServeFile},
  trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - REST-ish API under `/api/v1/...`
/// - Static SPA from `./static` with index fallback
/// - CORS (allow any origin/method/headers) – adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
  // Static files with SPA fallback
  let static_service = ServeDir::new("./static")
    .append_index_html_on_directories(true)
    .not_found_service(ServeFile::new("./static/index.html"));

  Router::new()
    .route("/api/v1/health", get(http::http_health))
    .route("/api/v1/programmes", get(http::http_get_programmes))
    .route("/api/v1/interests", get(http::http_get_interests))
    .route("/api/v1/catalog", get(http::http_get_catalog))
    .route("/api/v1/exercise", get(http::http_get_exercise))
    .route("/api/v1/personalize", post(http::http_post_personalize))
    // State + CORS + HTTP tracing
    .with_state(state)
    .layer(
      CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any),
    )
    .layer(
      TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
    // Frontend fallback
    .fallback_service(static_service)
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::body::Body;
  use axum::http::{Request, StatusCode};
  use http_body_util::BodyExt;
  use tower::ServiceExt;

  async fn body_json(res: axum::response::Response) -> serde_json::Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
  }

  fn test_router() -> Router {
    build_router(Arc::new(AppState::with_openai(None)))
  }

  #[tokio::test]
  async fn health_reports_ok() {
    let res = test_router()
      .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["ok"], true);
  }

  #[tokio::test]
  async fn programmes_and_interests_list_the_enumerations() {
    let res = test_router()
      .oneshot(Request::get("/api/v1/programmes").body(Body::empty()).unwrap())
      .await
      .unwrap();
    let v = body_json(res).await;
    assert_eq!(v["programmes"].as_array().unwrap().len(), 18);

    let res = test_router()
      .oneshot(Request::get("/api/v1/interests").body(Body::empty()).unwrap())
      .await
      .unwrap();
    let v = body_json(res).await;
    assert_eq!(v["interests"].as_array().unwrap().len(), 7);
  }

  #[tokio::test]
  async fn catalog_lists_categories_with_exercise_ids() {
    let res = test_router()
      .oneshot(Request::get("/api/v1/catalog").body(Body::empty()).unwrap())
      .await
      .unwrap();
    let v = body_json(res).await;
    let cats = v["categories"].as_array().unwrap();
    assert_eq!(cats.len(), 3);
    assert_eq!(cats[0]["name"], "Arithmetic (1a)");
    assert_eq!(cats[0]["exercises"].as_array().unwrap().len(), 5);
  }

  #[tokio::test]
  async fn exercise_endpoint_serves_statement_or_404() {
    let res = test_router()
      .oneshot(
        Request::get("/api/v1/exercise?category=Algebra%20(1b)&id=1B%20%E2%80%93%20Linear%20Equation")
          .body(Body::empty())
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["statement"], "Solve the equation: 2x − 5 = 15.");

    let res = test_router()
      .oneshot(Request::get("/api/v1/exercise?category=Nope&id=missing").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn personalize_without_client_returns_error_text_in_place() {
    let body = serde_json::json!({
      "programme": "Teknikprogrammet (TE) – Technology",
      "interests": { "Sport": "football" },
      "category": "Algebra (1b)",
      "exerciseId": "1B – Linear Equation"
    });
    let res = test_router()
      .oneshot(
        Request::post("/api/v1/personalize")
          .header("content-type", "application/json")
          .body(Body::from(body.to_string()))
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let v = body_json(res).await;
    assert_eq!(v["ok"], false);
    assert_eq!(v["original"], "Solve the equation: 2x − 5 = 15.");
    assert!(v["prompt"].as_str().unwrap().contains("football"));
    assert!(v["personalized"].as_str().unwrap().starts_with("Error calling the generation API:"));
  }

  #[tokio::test]
  async fn personalize_with_bad_selection_is_a_client_error() {
    let body = serde_json::json!({
      "programme": "Not a programme",
      "interests": {},
      "category": "Algebra (1b)",
      "exerciseId": "1B – Linear Equation"
    });
    let res = test_router()
      .oneshot(
        Request::post("/api/v1/personalize")
          .header("content-type", "application/json")
          .body(Body::from(body.to_string()))
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
  }
}
