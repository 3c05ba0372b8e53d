//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;

use axum::{
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
  Json,
};
use tracing::{info, instrument};

use crate::domain::{INTEREST_CATEGORIES, PROGRAMMES};
use crate::logic::{run_pipeline, RequestError};
use crate::protocol::*;
use crate::state::AppState;

impl IntoResponse for RequestError {
  fn into_response(self) -> axum::response::Response {
    let status = match &self {
      RequestError::Catalog(_) => StatusCode::NOT_FOUND,
      RequestError::Profile(_) => StatusCode::BAD_REQUEST,
    };
    (status, Json(ErrorOut { error: self.to_string() })).into_response()
  }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info")]
pub async fn http_get_programmes() -> impl IntoResponse {
  Json(ProgrammesOut { programmes: PROGRAMMES.iter().map(|s| s.to_string()).collect() })
}

#[instrument(level = "info")]
pub async fn http_get_interests() -> impl IntoResponse {
  Json(InterestsOut { interests: INTEREST_CATEGORIES.iter().map(|s| s.to_string()).collect() })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_catalog(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let categories = state
    .catalog
    .categories()
    .iter()
    .map(|c| CategoryOut {
      name: c.name.clone(),
      exercises: c.exercises.iter().map(|e| e.id.clone()).collect(),
    })
    .collect();
  Json(CatalogOut { categories })
}

#[instrument(level = "info", skip(state), fields(category = %q.category, id = %q.id))]
pub async fn http_get_exercise(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ExerciseQuery>,
) -> Result<Json<ExerciseOut>, RequestError> {
  let statement = state.catalog.lookup(&q.category, &q.id).map_err(RequestError::from)?.to_string();
  Ok(Json(ExerciseOut { category: q.category, id: q.id, statement }))
}

#[instrument(level = "info", skip(state, body), fields(category = %body.category, exercise_id = %body.exercise_id, interest_count = body.interests.len()))]
pub async fn http_post_personalize(
  State(state): State<Arc<AppState>>,
  Json(body): Json<PersonalizeIn>,
) -> Result<Json<PersonalizeOut>, RequestError> {
  let bundle = run_pipeline(
    &state,
    &body.programme,
    body.interests,
    &body.category,
    &body.exercise_id,
  )
  .await?;
  info!(target: "personalize", render_id = %bundle.render_id, ok = %bundle.ok, "HTTP personalize served");
  Ok(Json(to_out(bundle)))
}
