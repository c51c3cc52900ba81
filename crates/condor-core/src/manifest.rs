//! Manifest parsing and well-known fields.
//!
//! A manifest is a JSON object. Everything below the top level stays a plain
//! [`serde_json::Value`] so the reconciliation passes can match on its shape.

use crate::errors::{ConductorError, Result};
use serde_json::{Map, Value};

/// A Conductor definition document.
pub type Manifest = Map<String, Value>;

pub const NAME_KEY: &str = "name";
pub const VERSION_KEY: &str = "version";
pub const TASKS_KEY: &str = "tasks";

/// Fields the server fills in itself. They are never compared, never sent,
/// and never merged into local state.
pub const SERVER_OWNED_FIELDS: [&str; 4] = ["createTime", "updateTime", "createdBy", "updatedBy"];

/// Parse manifest text into a JSON object.
///
/// # Errors
///
/// `MalformedManifest` when the text is not JSON or the root is not an object.
pub fn parse_manifest(text: &str) -> Result<Manifest> {
    let value: Value = serde_json::from_str(text).map_err(|e| {
        ConductorError::malformed(format!("Manifest must be a valid json: {}", e))
    })?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ConductorError::malformed(format!(
            "Manifest JSON root must be an object, found {}",
            value_type_name(&other)
        ))),
    }
}

/// Parse a manifest returned by the server.
///
/// # Errors
///
/// `MalformedManifest` when the body is not a JSON object.
pub fn parse_manifest_bytes(bytes: &[u8]) -> Result<Manifest> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| ConductorError::malformed(format!("Manifest is not valid UTF-8: {}", e)))?;
    parse_manifest(text)
}

/// Serialize a manifest into its canonical text form.
///
/// # Errors
///
/// `Serialization` if serde_json rejects the value.
pub fn to_manifest_string(manifest: &Manifest) -> Result<String> {
    Ok(serde_json::to_string(manifest)?)
}

/// The definition name, which is also its identity on the server.
///
/// # Errors
///
/// `MalformedManifest` when `name` is missing, not a string, or empty.
pub fn manifest_name(manifest: &Manifest) -> Result<&str> {
    match manifest.get(NAME_KEY) {
        None => Err(ConductorError::malformed(
            "'name' parameter is missing from manifest",
        )),
        Some(Value::String(name)) if !name.is_empty() => Ok(name.as_str()),
        Some(_) => Err(ConductorError::malformed(
            "'name' parameter must be a non empty string",
        )),
    }
}

/// The embedded workflow `version`, if any.
///
/// Accepts integral JSON numbers (`3` or `3.0`) in `1..=i32::MAX`.
///
/// # Errors
///
/// `MalformedManifest` when the field is present but not such an integer.
pub fn optional_version(manifest: &Manifest) -> Result<Option<i32>> {
    let Some(value) = manifest.get(VERSION_KEY) else {
        return Ok(None);
    };

    let number = match value {
        Value::Number(n) => n,
        _ => return Err(ConductorError::malformed("'version' parameter must be int")),
    };

    let as_int = match (number.as_i64(), number.as_f64()) {
        (Some(i), _) => i,
        (None, Some(f)) if f.fract() == 0.0 && f.is_finite() => f as i64,
        _ => return Err(ConductorError::malformed("'version' parameter must be int")),
    };

    if as_int < 1 {
        return Err(ConductorError::malformed("'version' is smaller than 1"));
    }

    i32::try_from(as_int)
        .map(Some)
        .map_err(|_| ConductorError::malformed("'version' parameter is out of range"))
}

/// The embedded workflow `version`, which must be present.
///
/// # Errors
///
/// `MalformedManifest` when the field is missing or invalid.
pub fn required_version(manifest: &Manifest) -> Result<i32> {
    optional_version(manifest)?
        .ok_or_else(|| ConductorError::malformed("'version' parameter is missing from manifest"))
}

/// Remove server-owned fields before a manifest is sent or compared.
pub fn strip_server_owned(manifest: &mut Manifest) {
    for field in SERVER_OWNED_FIELDS {
        manifest.remove(field);
    }
}

/// The minimal manifest an import starts from; a refresh fills in the rest.
pub fn import_manifest(name: &str) -> Manifest {
    let mut manifest = Manifest::new();
    manifest.insert(NAME_KEY.to_string(), Value::String(name.to_string()));
    manifest
}

/// `true` for booleans, numbers and strings.
pub fn is_primitive(value: &Value) -> bool {
    matches!(value, Value::Bool(_) | Value::Number(_) | Value::String(_))
}

pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
