use serde_json::Value;

pub const GENERIC_FORECAST_ERROR: &str = "An error occurred during forecast generation.";

/// Extract a user-readable message from an error response body.
///
/// The forecasting service reports `detail` (a string, or a list of
/// validation entries carrying `msg`); the auth/proxy backend reports
/// `message`. Anything else falls back to `fallback`.
pub fn format_api_error(body: &str, fallback: &str) -> String {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return fallback.to_string();
    };

    match &json["detail"] {
        Value::String(detail) if !detail.is_empty() => return format!("Error: {}", detail),
        Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry["msg"].as_str())
                .collect();
            if !messages.is_empty() {
                return format!("Error: {}", messages.join("; "));
            }
        }
        _ => {}
    }

    json["message"]
        .as_str()
        .filter(|m| !m.is_empty())
        .map(|m| m.to_string())
        .unwrap_or_else(|| fallback.to_string())
}
