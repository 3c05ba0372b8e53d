//! Domain models: programme/interest enumerations and the student profile.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// Swedish upper-secondary programmes selectable in the profile.
/// Labels are shown verbatim to the student and embedded verbatim in prompts.
pub const PROGRAMMES: [&str; 18] = [
  "Naturvetenskapsprogrammet (NA) – Science",
  "Teknikprogrammet (TE) – Technology",
  "Ekonomiprogrammet (EK) – Economics",
  "Samhällsvetenskapsprogrammet (SA) – Social Sciences",
  "Humanistiska programmet (HU) – Humanities",
  "Estetiska programmet (ES) – Arts",
  "Vocational – Child and Recreation (BF)",
  "Vocational – Building and Construction (BA)",
  "Vocational – Electricity and Energy (EE)",
  "Vocational – Vehicle and Transport (FT)",
  "Vocational – Business and Administration (HA)",
  "Vocational – Handicraft (HV)",
  "Vocational – Hotel and Tourism (HT)",
  "Vocational – Industrial Technology (IN)",
  "Vocational – Natural Resource Use (NB)",
  "Vocational – Restaurant and Food (RL)",
  "Vocational – HVAC and Property Maintenance (VF)",
  "Vocational – Health and Social Care (VO)",
];

/// Interest categories a student can pick, optionally with a free-text detail.
pub const INTEREST_CATEGORIES: [&str; 7] = [
  "Sport",
  "Music",
  "Movies & Series",
  "Videogames",
  "Animals",
  "Technology",
  "Art & Drawing",
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProfileError {
  #[error("unknown programme: {0}")]
  UnknownProgramme(String),
  #[error("unknown interest category: {0}")]
  UnknownInterest(String),
}

/// Student profile assembled fresh on every render and discarded afterwards.
///
/// `interests` maps category name to the free-text detail the student typed.
/// An empty detail is kept as an empty string; the prompt embeds it literally.
/// BTreeMap keeps the serialized form deterministic.
#[derive(Clone, Debug, Serialize)]
pub struct StudentProfile {
  pub programme: String,
  pub interests: BTreeMap<String, String>,
}

impl StudentProfile {
  /// Build a profile from raw selections. The only validation is enumeration
  /// membership; details pass through verbatim.
  ///
  /// The 1–3 interest range is advisory (UI copy), not a hard constraint:
  /// out-of-range counts construct fine and only log a warning.
  pub fn build(
    programme: &str,
    interests: BTreeMap<String, String>,
  ) -> Result<Self, ProfileError> {
    if !PROGRAMMES.contains(&programme) {
      return Err(ProfileError::UnknownProgramme(programme.to_string()));
    }
    for category in interests.keys() {
      if !INTEREST_CATEGORIES.contains(&category.as_str()) {
        return Err(ProfileError::UnknownInterest(category.clone()));
      }
    }
    let n = interests.len();
    if n == 0 || n > 3 {
      warn!(target: "mappi_backend", count = n, "Interest count outside the advisory 1–3 range");
    }
    Ok(Self { programme: programme.to_string(), interests })
  }

  /// Pretty-JSON serialization embedded in the prompt and shown in diagnostics.
  pub fn to_pretty_json(&self) -> String {
    serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".into())
  }
}
