//! Serde helpers for partial-update attribute sets.

use serde::{Deserialize, Deserializer};

/// Deserialize a nullable attribute so that an absent key and an explicit
/// `null` stay distinct. Pair with `#[serde(default)]`:
///
/// | JSON            | Value              |
/// |-----------------|--------------------|
/// | key absent      | `None`             |
/// | `"key": null`   | `Some(None)`       |
/// | `"key": v`      | `Some(Some(v))`    |
pub fn nullable<'de, T, D>(de: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
  T: Deserialize<'de>,
  D: Deserializer<'de>,
{
  Option::<T>::deserialize(de).map(Some)
}
