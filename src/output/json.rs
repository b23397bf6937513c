use serde::Serialize;

/// Render a plan or outcome as a single JSON object.
///
/// # Errors
/// Returns an error if `value` cannot be serialized.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}
