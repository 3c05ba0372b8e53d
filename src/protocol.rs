//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::StudentProfile;
use crate::logic::RenderBundle;

#[derive(Serialize)]
pub struct HealthOut {
  pub ok: bool,
}

#[derive(Serialize)]
pub struct ProgrammesOut {
  pub programmes: Vec<String>,
}

#[derive(Serialize)]
pub struct InterestsOut {
  pub interests: Vec<String>,
}

/// Catalog listing: category names with their exercise ids, in bank order.
#[derive(Serialize)]
pub struct CatalogOut {
  pub categories: Vec<CategoryOut>,
}
#[derive(Serialize)]
pub struct CategoryOut {
  pub name: String,
  pub exercises: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExerciseQuery {
  pub category: String,
  pub id: String,
}
#[derive(Serialize)]
pub struct ExerciseOut {
  pub category: String,
  pub id: String,
  pub statement: String,
}

#[derive(Deserialize)]
pub struct PersonalizeIn {
  pub programme: String,
  /// Interest category → free-text detail (may be empty).
  #[serde(default)]
  pub interests: BTreeMap<String, String>,
  pub category: String,
  #[serde(rename = "exerciseId")]
  pub exercise_id: String,
}

/// The four presentation values of one render, plus a correlation id.
/// `ok = false` means `personalized` carries the displayable error string.
#[derive(Serialize)]
pub struct PersonalizeOut {
  #[serde(rename = "renderId")]
  pub render_id: String,
  pub original: String,
  pub profile: StudentProfile,
  pub prompt: String,
  pub personalized: String,
  pub ok: bool,
}

pub fn to_out(b: RenderBundle) -> PersonalizeOut {
  PersonalizeOut {
    render_id: b.render_id,
    original: b.original,
    profile: b.profile,
    prompt: b.prompt,
    personalized: b.personalized,
    ok: b.ok,
  }
}

/// Error body for selection errors (unknown programme/category/exercise).
#[derive(Serialize)]
pub struct ErrorOut {
  pub error: String,
}
