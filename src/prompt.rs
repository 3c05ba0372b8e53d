//! Prompt composition: profile + exercise → one instruction string.
//!
//! `compose` is pure and deterministic; the same profile and exercise always
//! produce byte-identical output. The exercise statement is embedded verbatim
//! inside `"""` delimiters so the model cannot confuse instructions with
//! problem content, and the profile appears as a pretty-JSON block so every
//! field is recoverable by reading the prompt.

use crate::config::Prompts;
use crate::domain::StudentProfile;
use crate::util::fill_template;

/// Delimiter wrapped around the original statement inside the prompt.
pub const EXERCISE_DELIMITER: &str = "\"\"\"";

pub fn compose(prompts: &Prompts, profile: &StudentProfile, exercise_text: &str) -> String {
  fill_template(
    &prompts.personalize_user_template,
    &[
      ("profile_json", &profile.to_pretty_json()),
      ("exercise", exercise_text),
    ],
  )
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeMap;

  use super::*;

  fn profile(programme: &str, pairs: &[(&str, &str)]) -> StudentProfile {
    let interests: BTreeMap<String, String> =
      pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    StudentProfile::build(programme, interests).unwrap()
  }

  /// Extracts the text between the `"""` delimiters.
  fn delimited(prompt: &str) -> &str {
    let start = prompt.find(EXERCISE_DELIMITER).unwrap() + EXERCISE_DELIMITER.len();
    let end = prompt[start..].find(EXERCISE_DELIMITER).unwrap() + start;
    &prompt[start..end]
  }

  #[test]
  fn composition_is_deterministic() {
    let p = profile("Teknikprogrammet (TE) – Technology", &[("Sport", "football")]);
    let prompts = Prompts::default();
    let a = compose(&prompts, &p, "Solve the equation: 2x − 5 = 15.");
    let b = compose(&prompts, &p, "Solve the equation: 2x − 5 = 15.");
    assert_eq!(a, b);
  }

  #[test]
  fn exercise_text_is_preserved_between_delimiters() {
    let p = profile("Estetiska programmet (ES) – Arts", &[("Music", "piano")]);
    for text in [
      "A rectangle is 5 cm wide and has an area of 45 cm². What is its length?",
      "Compute: 48 ÷ 6 × 4.",
      "Weird \"quoted\" text with {braces} and\nnewlines.",
    ] {
      let prompt = compose(&Prompts::default(), &p, text);
      assert_eq!(delimited(&prompt), text);
    }
  }

  #[test]
  fn every_profile_field_appears_in_the_prompt() {
    let p = profile(
      "Samhällsvetenskapsprogrammet (SA) – Social Sciences",
      &[("Animals", "horses"), ("Videogames", "Zelda")],
    );
    let prompt = compose(&Prompts::default(), &p, "Round the number 47.68 to one decimal place.");
    assert!(prompt.contains("Samhällsvetenskapsprogrammet (SA) – Social Sciences"));
    assert!(prompt.contains("Animals"));
    assert!(prompt.contains("horses"));
    assert!(prompt.contains("Videogames"));
    assert!(prompt.contains("Zelda"));
  }

  #[test]
  fn placeholder_text_in_a_detail_stays_literal() {
    // Details are unconstrained free text; one that spells a template
    // placeholder must still be recoverable verbatim from the profile block.
    let p = profile("Teknikprogrammet (TE) – Technology", &[("Sport", "{exercise}")]);
    let exercise = "Solve the equation: 2x − 5 = 15.";
    let prompt = compose(&Prompts::default(), &p, exercise);
    assert!(prompt.contains("\"Sport\": \"{exercise}\""));
    // The real statement appears exactly once, inside the delimiters.
    assert_eq!(prompt.matches(exercise).count(), 1);
    assert_eq!(delimited(&prompt), exercise);
  }

  #[test]
  fn constraint_blocks_are_always_present() {
    let p = profile("Vocational – Handicraft (HV)", &[("Art & Drawing", "")]);
    let prompt = compose(&Prompts::default(), &p, "Factorize the expression: x^2 − 9.");
    assert!(prompt.contains("Do NOT change the mathematical structure."));
    assert!(prompt.contains("Do NOT change the numbers."));
    assert!(prompt.contains("Do NOT change the level of difficulty."));
    assert!(prompt.contains("Do NOT add any explanation, solution, or commentary."));
    assert!(prompt.contains("Return ONLY the rewritten exercise text."));
    assert!(prompt.contains("Do NOT use bullet points or numbering."));
  }

  #[test]
  fn end_to_end_example() {
    // The reference render: TE student who likes football, linear equation.
    let p = profile("Teknikprogrammet (TE) – Technology", &[("Sport", "football")]);
    let prompt = compose(&Prompts::default(), &p, "Solve the equation: 2x − 5 = 15.");

    assert!(prompt.contains("\"\"\"Solve the equation: 2x − 5 = 15.\"\"\""));
    assert!(prompt.contains("Teknikprogrammet (TE) – Technology"));
    assert!(prompt.contains("football"));
    assert!(prompt.contains("Do NOT change the numbers."));
    assert!(prompt.contains("Do NOT add labels like \"Personalized context\", \"Exercise:\", \"Solution:\" or similar."));
  }
}
