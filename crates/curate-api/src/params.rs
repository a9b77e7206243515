//! Request parameter helpers shared by every resource module.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Deserialise the permitted attributes from a request body.
///
/// Accepts the attributes either bare (`{"first": "Ada"}`) or nested under the
/// singular `root` key (`{"author": {"first": "Ada"}}`). Unknown attributes
/// are ignored.
pub fn permit<T: DeserializeOwned>(root: &str, body: Value) -> Result<T, ApiError> {
  let attrs = match body {
    Value::Object(mut map) if map.get(root).is_some_and(Value::is_object) => {
      map.remove(root).unwrap_or_default()
    }
    obj @ Value::Object(_) => obj,
    _ => {
      return Err(ApiError::BadRequest(format!(
        "expected a JSON object of {root} attributes"
      )));
    }
  };
  serde_json::from_value(attrs).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Parse a path id. Anything that is not an integer cannot name a row, so it
/// is reported as not found.
pub fn record_id(entity: &str, raw: &str) -> Result<i64, ApiError> {
  raw.parse().map_err(|_| ApiError::not_found(entity, raw))
}
