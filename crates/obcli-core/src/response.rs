//! # Response Module
//!
//! Turning a failed HTTP response into the one-line message shown to the user.
//!
//! Open Banking servers answer errors with an `OBErrorResponse1`:
//!
//! ```json
//! {
//!   "Code": "400 BadRequest",
//!   "Message": "There was a problem with the request",
//!   "Errors": [{ "ErrorCode": "UK.OBIE.Field.Invalid", "Message": "Invalid date", "Path": "fromBookingDateTime" }]
//! }
//! ```
//!
//! Gateways in front of the API sometimes use `message` / `error` /
//! `error_description` instead, or plain text.

use serde_json::Value;

/// Best message for a non-2xx response.
///
/// Order of preference:
/// 1. `Errors[].Message`, joined with `; `
/// 2. top-level `Message`
/// 3. `message`, `error_description`, `error`
/// 4. the raw body, trimmed
/// 5. `HTTP <status>`
pub fn server_error_message(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return format!("HTTP {}", status);
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => from_json(&value).unwrap_or_else(|| format!("HTTP {}: {}", status, trimmed)),
        Err(_) => trimmed.to_string(),
    }
}

fn from_json(value: &Value) -> Option<String> {
    let details: Vec<&str> = value
        .get("Errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e.get("Message").and_then(Value::as_str))
                .filter(|m| !m.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if !details.is_empty() {
        return Some(details.join("; "));
    }

    ["Message", "message", "error_description", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str).filter(|m| !m.is_empty()))
        .map(str::to_string)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn detail_messages_win() {
        let body = r#"{
            "Code": "400 BadRequest",
            "Message": "There was a problem with the request",
            "Errors": [
                {"ErrorCode": "UK.OBIE.Field.Invalid", "Message": "Invalid fromBookingDateTime"},
                {"ErrorCode": "UK.OBIE.Field.Missing", "Message": "Missing sandbox-id"}
            ]
        }"#;
        assert_eq!(
            server_error_message(400, body),
            "Invalid fromBookingDateTime; Missing sandbox-id"
        );
    }

    #[test]
    fn top_level_message_when_no_details() {
        let body = r#"{"Code":"403 Forbidden","Message":"Consent revoked","Errors":[]}"#;
        assert_eq!(server_error_message(403, body), "Consent revoked");
    }

    #[test]
    fn gateway_style_keys() {
        assert_eq!(
            server_error_message(401, r#"{"error":"invalid_token","error_description":"Token expired"}"#),
            "Token expired"
        );
        assert_eq!(server_error_message(429, r#"{"message":"Slow down"}"#), "Slow down");
    }

    #[test]
    fn empty_message_falls_through_to_next_key() {
        assert_eq!(
            server_error_message(401, r#"{"Message":"","error_description":"Token expired"}"#),
            "Token expired"
        );
        assert_eq!(
            server_error_message(401, r#"{"Message":"","message":"","error":"invalid_token"}"#),
            "invalid_token"
        );
    }

    #[test]
    fn plain_text_body_is_used_verbatim() {
        assert_eq!(server_error_message(502, "  Bad Gateway\n"), "Bad Gateway");
    }

    #[test]
    fn unrecognised_json_keeps_status() {
        assert_eq!(server_error_message(500, r#"{"foo":1}"#), r#"HTTP 500: {"foo":1}"#);
    }

    #[test]
    fn empty_body_falls_back_to_status() {
        assert_eq!(server_error_message(404, ""), "HTTP 404");
    }
}
