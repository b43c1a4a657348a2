//! Shape validation for status API responses

use serde_json::Value;

use crate::models::StatusResponse;
use crate::utils::error::ValidationError;

const KEY_HOMEWORKS: &str = "homeworks";
const KEY_CURRENT_DATE: &str = "current_date";

/// Check a raw payload against the documented response contract
///
/// Only the top-level shape is checked; homework entries are passed through
/// untouched.
///
/// # Errors
///
/// - `NotAMapping` if the payload is not a JSON object
/// - `MissingKeys` naming every absent key
/// - `WrongFieldType` if `homeworks` is not an array
pub fn check_response(payload: Value) -> Result<StatusResponse, ValidationError> {
    tracing::debug!("Checking API response structure");

    let Value::Object(mut map) = payload else {
        return Err(ValidationError::NotAMapping);
    };

    let missing: Vec<&'static str> = [KEY_HOMEWORKS, KEY_CURRENT_DATE]
        .into_iter()
        .filter(|key| !map.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingKeys(missing));
    }

    let homeworks = match map.remove(KEY_HOMEWORKS) {
        Some(Value::Array(items)) => items,
        _ => {
            return Err(ValidationError::WrongFieldType {
                field: KEY_HOMEWORKS,
            })
        }
    };
    let current_date = map.remove(KEY_CURRENT_DATE).unwrap_or(Value::Null);

    tracing::debug!(homeworks = homeworks.len(), "API response structure is valid");
    Ok(StatusResponse {
        homeworks,
        current_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_response() {
        let response = check_response(json!({
            "homeworks": [{"homework_name": "hw1", "status": "approved"}],
            "current_date": 1000
        }))
        .unwrap();

        assert_eq!(response.homeworks.len(), 1);
        assert_eq!(response.current_date, json!(1000));
    }

    #[test]
    fn test_empty_homeworks_is_valid() {
        let response = check_response(json!({"homeworks": [], "current_date": 1000})).unwrap();
        assert!(response.latest().is_none());
    }

    #[test]
    fn test_not_a_mapping() {
        assert_eq!(
            check_response(json!([{"homeworks": []}])),
            Err(ValidationError::NotAMapping)
        );
        assert_eq!(check_response(json!("text")), Err(ValidationError::NotAMapping));
        assert_eq!(check_response(Value::Null), Err(ValidationError::NotAMapping));
    }

    #[test]
    fn test_missing_keys() {
        assert_eq!(
            check_response(json!({"homeworks": []})),
            Err(ValidationError::MissingKeys(vec!["current_date"]))
        );
        assert_eq!(
            check_response(json!({})),
            Err(ValidationError::MissingKeys(vec!["homeworks", "current_date"]))
        );
    }

    #[test]
    fn test_homeworks_wrong_type() {
        assert_eq!(
            check_response(json!({"homeworks": {"homework_name": "hw1"}, "current_date": 1})),
            Err(ValidationError::WrongFieldType { field: "homeworks" })
        );
    }

    #[test]
    fn test_items_not_inspected() {
        let response =
            check_response(json!({"homeworks": [42, "x"], "current_date": 1})).unwrap();
        assert_eq!(response.homeworks, vec![json!(42), json!("x")]);
    }
}
