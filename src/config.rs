//! Loading app configuration (prompts + optional extra exercises) from TOML.
//!
//! See `AppConfig` and `Prompts` for the expected schema.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub exercises: Vec<ExerciseCfg>,
}

/// Extra catalog entry accepted in TOML configuration. Merged into the
/// built-in bank at startup; entries with empty fields are skipped.
#[derive(Clone, Debug, Deserialize)]
pub struct ExerciseCfg {
  pub category: String,
  pub id: String,
  pub statement: String,
}

/// Prompts used by the OpenAI client and the composer. Defaults reproduce the
/// original personalization instructions; override them in TOML to tune tone.
///
/// `personalize_user_template` supports two placeholders:
/// `{profile_json}` (pretty-printed student profile) and `{exercise}`
/// (the original statement, embedded inside triple-quote delimiters).
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  pub personalize_system: String,
  pub personalize_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      personalize_system: "You rewrite math problems by changing ONLY the context.".into(),
      personalize_user_template: "\
You are a math problem writer.

Rewrite the following exercise by personalizing its context based on the student's interests and high school programme.

CRITICAL CONSTRAINTS:
- Do NOT change the mathematical structure.
- Do NOT change the numbers.
- Do NOT change the level of difficulty.
- Do NOT add any explanation, solution, or commentary.

OUTPUT FORMAT (VERY IMPORTANT):
- Return ONLY the rewritten exercise text.
- Do NOT add labels like \"Personalized context\", \"Exercise:\", \"Solution:\" or similar.
- Do NOT use bullet points or numbering. Just a single problem statement.

Student profile:
{profile_json}

Exercise:
\"\"\"{exercise}\"\"\"
"
      .into(),
    }
  }
}

/// Attempt to load `AppConfig` from MAPPI_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("MAPPI_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "mappi_backend", %path, "Loaded app config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "mappi_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "mappi_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
