//! Field-level validation.
//!
//! A rule inspects a candidate entity and records violations in an [`Errors`]
//! map keyed by attribute name. The map serialises directly into the `errors`
//! member of a 422 response body.

use std::{collections::BTreeMap, fmt};

use serde::Serialize;

/// Message for a missing, empty, or whitespace-only value.
pub const BLANK: &str = "can't be blank";
/// Message for a value already present on another row of the same table.
pub const TAKEN: &str = "has already been taken";
/// Message for a reference whose target row does not exist.
pub const MUST_EXIST: &str = "must exist";

/// Attribute used for errors that concern the record as a whole.
pub const BASE: &str = "base";

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Violations grouped by attribute, messages kept in the order they were
/// added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Errors(BTreeMap<String, Vec<String>>);

impl Errors {
  pub fn new() -> Self { Self::default() }

  pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
    self.0.entry(field.into()).or_default().push(message.into());
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  /// Messages recorded against `field`, if any.
  pub fn get(&self, field: &str) -> Option<&[String]> {
    self.0.get(field).map(Vec::as_slice)
  }

  pub fn merge(&mut self, other: Errors) {
    for (field, messages) in other.0 {
      self.0.entry(field).or_default().extend(messages);
    }
  }

  /// `Ok(())` when nothing was recorded, otherwise the errors themselves.
  pub fn into_result(self) -> Result<(), Errors> {
    if self.is_empty() { Ok(()) } else { Err(self) }
  }

  /// Human-readable sentences, e.g. `"Resource type has already been taken"`.
  /// Messages on [`BASE`] are emitted without an attribute prefix.
  pub fn full_messages(&self) -> Vec<String> {
    self
      .0
      .iter()
      .flat_map(|(field, messages)| {
        messages.iter().map(move |m| {
          if field == BASE {
            m.clone()
          } else {
            format!("{} {m}", humanize(field))
          }
        })
      })
      .collect()
  }
}

impl fmt::Display for Errors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.full_messages().join(", "))
  }
}

impl std::error::Error for Errors {}

fn humanize(field: &str) -> String {
  let spaced = field.replace('_', " ");
  let mut chars = spaced.chars();
  match chars.next() {
    Some(c) => c.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

// ─── Rules ───────────────────────────────────────────────────────────────────

/// Absent, empty, and whitespace-only values are all blank.
pub fn is_blank(value: Option<&str>) -> bool {
  value.is_none_or(|v| v.trim().is_empty())
}

/// Record [`BLANK`] against `field` if `value` is blank.
pub fn presence(errors: &mut Errors, field: &str, value: Option<&str>) {
  if is_blank(value) {
    errors.add(field, BLANK);
  }
}

/// Intrinsic rules: everything that can be checked without the datastore.
///
/// Rules that need to look at other rows (uniqueness, referenced rows) live in
/// [`crate::rules`].
pub trait Validate {
  fn validate(&self) -> Errors;
}
