//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// This is intentionally simple (no nested/conditional logic).
///
/// Single pass over the template: inserted values are never rescanned, so a
/// value that itself contains `{key}` text stays literal in the output.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = String::with_capacity(tpl.len());
  let mut rest = tpl;
  'scan: while let Some(open) = rest.find('{') {
    for (k, v) in pairs {
      let needle = format!("{{{}}}", k);
      if rest[open..].starts_with(&needle) {
        out.push_str(&rest[..open]);
        out.push_str(v);
        rest = &rest[open + needle.len()..];
        continue 'scan;
      }
    }
    // Not one of our placeholders; keep the brace and move on.
    out.push_str(&rest[..=open]);
    rest = &rest[open + 1..];
  }
  out.push_str(rest);
  out
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    s.to_string()
  } else {
    let cut = s.char_indices().take_while(|(i, _)| *i < max).map(|(i, c)| i + c.len_utf8()).last().unwrap_or(0);
    format!("{}… ({} bytes total)", &s[..cut], s.len())
  }
}
