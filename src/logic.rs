//! The render pipeline: lookup → profile build → compose → personalize.
//!
//! Pure steps (catalog, profile, composer) run first; the single effectful
//! step is the provider call at the end. Any provider failure is folded into
//! a displayable error string so the rest of the bundle stays intact.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::catalog::CatalogError;
use crate::domain::{ProfileError, StudentProfile};
use crate::prompt::compose;
use crate::state::AppState;
use crate::util::trunc_for_log;

/// Selection errors: the caller asked for something outside the enumerations.
/// Distinct from provider failures, which never abort a render.
#[derive(Error, Debug)]
pub enum RequestError {
  #[error(transparent)]
  Catalog(#[from] CatalogError),
  #[error(transparent)]
  Profile(#[from] ProfileError),
}

/// Everything the presentation layer needs for one render.
#[derive(Debug)]
pub struct RenderBundle {
  pub render_id: String,
  pub original: String,
  pub profile: StudentProfile,
  pub prompt: String,
  /// Reply text, or the displayable error string when the call failed.
  pub personalized: String,
  pub ok: bool,
}

/// Run the full pipeline once. Exactly one provider round trip; no retry.
#[instrument(level = "info", skip(state, interests), fields(%category, %exercise_id, interest_count = interests.len()))]
pub async fn run_pipeline(
  state: &AppState,
  programme: &str,
  interests: BTreeMap<String, String>,
  category: &str,
  exercise_id: &str,
) -> Result<RenderBundle, RequestError> {
  let original = state.catalog.lookup(category, exercise_id)?.to_string();
  let profile = StudentProfile::build(programme, interests)?;
  let prompt = compose(&state.prompts, &profile, &original);

  let render_id = Uuid::new_v4().to_string();
  let (personalized, ok) = match &state.openai {
    Some(oa) => match oa.personalize(&state.prompts, &prompt).await {
      Ok(text) => (text, true),
      Err(e) => {
        error!(target: "personalize", %render_id, error = %e, "Personalization failed; rendering error text");
        (format!("Error calling the generation API: {e}"), false)
      }
    },
    None => {
      error!(target: "personalize", %render_id, "No OpenAI client configured; rendering error text");
      ("Error calling the generation API: OPENAI_API_KEY is not set".to_string(), false)
    }
  };

  info!(
    target: "personalize",
    %render_id,
    %ok,
    original = %trunc_for_log(&original, 80),
    reply = %trunc_for_log(&personalized, 80),
    "Render completed"
  );

  Ok(RenderBundle { render_id, original, profile, prompt, personalized, ok })
}
