//! Translation of homework statuses into chat messages

use crate::models::{Homework, HomeworkStatus};
use crate::utils::error::TranslationError;
use crate::utils::json_to_text;

/// Build the notification text for a homework entry
///
/// The result depends only on the entry's `homework_name` and `status`.
///
/// # Errors
///
/// - `MissingName` if the entry has no `homework_name` (or is not an object)
/// - `UnknownStatus` if `status` is absent or not a known review status
pub fn parse_status(homework: &Homework) -> Result<String, TranslationError> {
    tracing::debug!("Extracting status from homework entry");

    let name = homework
        .get("homework_name")
        .ok_or(TranslationError::MissingName)?;

    let raw_status = homework.get("status").unwrap_or(&serde_json::Value::Null);
    let status = raw_status
        .as_str()
        .and_then(|s| s.parse::<HomeworkStatus>().ok())
        .ok_or_else(|| TranslationError::UnknownStatus(json_to_text(raw_status)))?;

    Ok(status_message(&json_to_text(name), status))
}

/// Format the message for a homework name and status
pub fn status_message(name: &str, status: HomeworkStatus) -> String {
    format!(
        "Изменился статус проверки работы \"{name}\". {}",
        status.verdict()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_approved_message() {
        let message = parse_status(&json!({"homework_name": "hw1", "status": "approved"})).unwrap();
        assert_eq!(
            message,
            "Изменился статус проверки работы \"hw1\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn test_reviewing_and_rejected() {
        let reviewing =
            parse_status(&json!({"homework_name": "hw1", "status": "reviewing"})).unwrap();
        assert!(reviewing.ends_with("Работа взята на проверку ревьюером."));

        let rejected = parse_status(&json!({"homework_name": "hw1", "status": "rejected"})).unwrap();
        assert!(rejected.ends_with("Работа проверена: у ревьюера есть замечания."));
    }

    #[test]
    fn test_missing_name() {
        assert_eq!(
            parse_status(&json!({"status": "approved"})),
            Err(TranslationError::MissingName)
        );
        assert_eq!(parse_status(&json!("hw1")), Err(TranslationError::MissingName));
    }

    #[test]
    fn test_unknown_status() {
        assert_eq!(
            parse_status(&json!({"homework_name": "hw1", "status": "unknown_code"})),
            Err(TranslationError::UnknownStatus("unknown_code".to_string()))
        );
    }

    #[test]
    fn test_missing_status_reported_as_null() {
        assert_eq!(
            parse_status(&json!({"homework_name": "hw1"})),
            Err(TranslationError::UnknownStatus("null".to_string()))
        );
    }

    #[test]
    fn test_name_checked_before_status() {
        assert_eq!(
            parse_status(&json!({"status": "bogus"})),
            Err(TranslationError::MissingName)
        );
    }

    #[test]
    fn test_non_string_name() {
        let message = parse_status(&json!({"homework_name": 7, "status": "approved"})).unwrap();
        assert!(message.contains("\"7\""));
    }
}
