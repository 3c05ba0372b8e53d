//! Static exercise catalog: categories of fixed, self-contained math problems.
//!
//! The bank is assembled once at startup (built-in entries plus optional TOML
//! extras) and never mutated afterwards. Statements are embedded verbatim in
//! prompts, so the text here is the single source of truth.

use thiserror::Error;
use tracing::{error, info};

use crate::config::ExerciseCfg;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
  #[error("unknown category: {0}")]
  UnknownCategory(String),
  #[error("unknown exercise '{id}' in category '{category}'")]
  UnknownExercise { category: String, id: String },
}

#[derive(Clone, Debug)]
pub struct Exercise {
  pub id: String,
  pub statement: String,
}

#[derive(Clone, Debug)]
pub struct Category {
  pub name: String,
  pub exercises: Vec<Exercise>,
}

/// Read-only exercise bank. Vec keeps declaration order stable so the
/// selection UI lists categories and exercises the same way every run.
#[derive(Clone, Debug)]
pub struct ExerciseCatalog {
  categories: Vec<Category>,
}

impl ExerciseCatalog {
  /// The built-in bank: Swedish Mathematics 1a/1b/1c course exercises.
  pub fn builtin() -> Self {
    let bank: &[(&str, &[(&str, &str)])] = &[
      (
        "Arithmetic (1a)",
        &[
          ("1A – Percentage Increase", "A price is 80 kr and increases by 20%. What is the new price?"),
          ("1A – Rounding", "Round the number 47.68 to one decimal place."),
          ("1A – Change Factor", "A value of 50 is multiplied by a factor of 1.2. What is the new value?"),
          ("1A – Exponents Comparison", "Compare the numbers 3^4 and 5^3. Which one is larger?"),
          ("1A – Basic Calculation", "Compute: 48 ÷ 6 × 4."),
        ],
      ),
      (
        "Algebra (1b)",
        &[
          ("1B – Simplify Expression", "Simplify: 3(x + 2) − x."),
          ("1B – Linear Equation", "Solve the equation: 2x − 5 = 15."),
          ("1B – Factorization", "Factorize the expression: x^2 − 9."),
          ("1B – Simplifying with Parentheses", "Simplify: 5a − 2(3a − 4)."),
          ("1B – Inequality", "Solve the inequality: 4x + 3 > 19."),
        ],
      ),
      (
        "Functions, Geometry & Probability (1c)",
        &[
          ("1C – Linear Functions (Slope)", "Given points (2, 3) and (5, 9), find the slope of the line."),
          ("1C – Exponential Expression", "Evaluate the expression: 2 × 3^4."),
          ("1C – Similar Triangles", "A triangle has sides 6, 8, and 10. A similar triangle has a shortest side of 3. What is the length of the longest side?"),
          ("1C – Area & Dimensions", "A rectangle is 5 cm wide and has an area of 45 cm². What is its length?"),
          ("1C – Probability (Independent Events)", "A coin is flipped twice. What is the probability of getting two heads?"),
        ],
      ),
    ];

    let categories = bank
      .iter()
      .map(|(name, items)| Category {
        name: name.to_string(),
        exercises: items
          .iter()
          .map(|(id, statement)| Exercise { id: id.to_string(), statement: statement.to_string() })
          .collect(),
      })
      .collect();

    Self { categories }
  }

  /// Merge extra TOML entries into the bank. Entries with empty fields or
  /// duplicate (category, id) are skipped with an error log; new categories
  /// are appended after the built-in ones.
  pub fn merge_config(&mut self, extra: &[ExerciseCfg]) {
    for cfg in extra {
      if cfg.category.is_empty() || cfg.id.is_empty() || cfg.statement.is_empty() {
        error!(target: "personalize", id = %cfg.id, "Skipping config exercise: empty field");
        continue;
      }
      if self.lookup(&cfg.category, &cfg.id).is_ok() {
        error!(target: "personalize", category = %cfg.category, id = %cfg.id, "Skipping config exercise: duplicate id");
        continue;
      }
      let exercise = Exercise { id: cfg.id.clone(), statement: cfg.statement.clone() };
      match self.categories.iter_mut().find(|c| c.name == cfg.category) {
        Some(cat) => cat.exercises.push(exercise),
        None => self.categories.push(Category { name: cfg.category.clone(), exercises: vec![exercise] }),
      }
      info!(target: "personalize", category = %cfg.category, id = %cfg.id, "Added config exercise");
    }
  }

  /// Full statement text for (category, id). Absent selections fail
  /// distinctly; this never returns empty text for a present entry.
  pub fn lookup(&self, category: &str, id: &str) -> Result<&str, CatalogError> {
    let cat = self
      .categories
      .iter()
      .find(|c| c.name == category)
      .ok_or_else(|| CatalogError::UnknownCategory(category.to_string()))?;
    cat
      .exercises
      .iter()
      .find(|e| e.id == id)
      .map(|e| e.statement.as_str())
      .ok_or_else(|| CatalogError::UnknownExercise { category: category.to_string(), id: id.to_string() })
  }

  pub fn categories(&self) -> &[Category] {
    &self.categories
  }
}
