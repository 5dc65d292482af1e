//! Diesel models and the configuration model.

pub mod config;
pub mod item;
pub mod promotion;
pub mod user;

/// Decodes a JSON string list stored in a text column.
pub(crate) fn decode_list(column: &str, raw: &str) -> Vec<String> {
    match serde_json::from_str(raw) {
        Ok(list) => list,
        Err(err) => {
            log::warn!("Ignoring malformed `{column}` list `{raw}`: {err}");
            Vec::new()
        }
    }
}

/// Encodes a string list for a text column.
pub(crate) fn encode_list(list: &[String]) -> String {
    serde_json::to_string(list).unwrap_or_else(|_| "[]".to_string())
}
