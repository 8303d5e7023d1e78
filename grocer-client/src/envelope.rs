//! Response envelope handling.
//!
//! The service wraps results as `{"status": "success", "data": ...}` and
//! reports failures as `{"status": "error", "message": ...}` with HTTP 200.

use serde::de::DeserializeOwned;
use serde_json::Value;

use grocer_core::error::{GrocerError, Result};

use crate::endpoint::PayloadLocation;

/// Fails if the body is an error envelope.
pub(crate) fn check_status(body: &Value) -> Result<()> {
    if body.get("status").and_then(Value::as_str) == Some("error") {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(GrocerError::Backend(message.to_string()));
    }

    // Plot endpoints report failures as {"error": "..."}
    if let Some(message) = body.get("error").and_then(Value::as_str) {
        return Err(GrocerError::Backend(message.to_string()));
    }

    Ok(())
}

/// Extracts and deserializes the payload from a checked body.
pub(crate) fn decode<T: DeserializeOwned>(body: &Value, location: PayloadLocation) -> Result<T> {
    let payload = match location {
        PayloadLocation::Data => body
            .get("data")
            .ok_or_else(|| GrocerError::MissingField("data".into()))?,
        PayloadLocation::TopLevel => body,
        PayloadLocation::Image => {
            return Err(GrocerError::UnexpectedContentType {
                expected: "application/json".into(),
                actual: "image/*".into(),
            })
        }
    };

    Ok(T::deserialize(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocer_core::types::{StatsSummary, TopProduct};
    use serde_json::json;

    #[test]
    fn test_check_status_success() {
        assert!(check_status(&json!({"status": "success", "data": []})).is_ok());
        assert!(check_status(&json!({"data": []})).is_ok());
    }

    #[test]
    fn test_check_status_error_message() {
        let err = check_status(&json!({"status": "error", "message": "Veri yüklenemedi"})).unwrap_err();
        assert!(matches!(err, GrocerError::Backend(ref m) if m == "Veri yüklenemedi"));
    }

    #[test]
    fn test_check_status_error_without_message() {
        let err = check_status(&json!({"status": "error"})).unwrap_err();
        assert_eq!(err.to_string(), "Service error: unknown error");
    }

    #[test]
    fn test_check_status_plot_error() {
        assert!(check_status(&json!({"error": "no data"})).is_err());
    }

    #[test]
    fn test_decode_data() {
        let body = json!({"status": "success", "data": {"total_orders": 3}});
        let stats: StatsSummary = decode(&body, PayloadLocation::Data).unwrap();
        assert_eq!(stats.total_orders, 3);
    }

    #[test]
    fn test_decode_missing_data() {
        let body = json!({"status": "success"});
        let result: Result<Vec<TopProduct>> = decode(&body, PayloadLocation::Data);
        assert!(matches!(result, Err(GrocerError::MissingField(_))));
    }

    #[test]
    fn test_decode_wrong_shape() {
        let body = json!({"status": "success", "data": "oops"});
        let result: Result<Vec<TopProduct>> = decode(&body, PayloadLocation::Data);
        assert!(matches!(result, Err(GrocerError::JsonError(_))));
    }
}
