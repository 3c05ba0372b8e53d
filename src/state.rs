//! Application state: the exercise catalog, prompts, and optional OpenAI client.
//!
//! Everything here is read-only after startup. Handlers share the state via
//! `Arc`; there is no mutable store, no cache, and no per-render persistence.

use tracing::{info, instrument};

use crate::catalog::ExerciseCatalog;
use crate::config::{load_app_config_from_env, Prompts};
use crate::openai::OpenAI;

#[derive(Clone)]
pub struct AppState {
  pub catalog: ExerciseCatalog,
  pub prompts: Prompts,
  pub openai: Option<OpenAI>,
}

impl AppState {
  /// Build state from env: load config, assemble the catalog, init OpenAI.
  #[instrument(level = "info", skip_all)]
  pub fn new() -> Self {
    // Load TOML config if provided (prompt overrides + extra exercises).
    let cfg_opt = load_app_config_from_env();
    let prompts = cfg_opt.as_ref().map(|c| c.prompts.clone()).unwrap_or_default();

    let mut catalog = ExerciseCatalog::builtin();
    if let Some(cfg) = &cfg_opt {
      catalog.merge_config(&cfg.exercises);
    }

    // Inventory summary by category.
    for cat in catalog.categories() {
      info!(target: "personalize", category = %cat.name, exercises = cat.exercises.len(), "Startup catalog inventory");
    }

    // Build optional OpenAI client (if API key present). A missing key is not
    // an error here; it surfaces when a personalization call is attempted.
    let openai = OpenAI::from_env();
    if let Some(oa) = &openai {
      info!(target: "mappi_backend", base_url = %oa.base_url, model = %oa.model, "OpenAI enabled.");
    } else {
      info!(target: "mappi_backend", "OpenAI disabled (no OPENAI_API_KEY). Personalization will report an error.");
    }

    Self { catalog, prompts, openai }
  }

  /// State with an explicit client, for tests that stub the provider.
  #[cfg(test)]
  pub fn with_openai(openai: Option<OpenAI>) -> Self {
    Self { catalog: ExerciseCatalog::builtin(), prompts: Prompts::default(), openai }
  }
}
