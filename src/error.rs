//! Unified error handling for the poll cycle
//!
//! This module provides a unified error type that consolidates the stage
//! errors a poll cycle can hit into a single `Error` enum, while keeping the
//! stage errors available for callers that need to match on them.
//!
//! # Architecture
//!
//! - [`BotErrorTrait`] - Common interface implemented by all cycle error types
//! - [`ErrorCategory`] - Classification of errors for log records
//! - [`Error`] - Unified error enum wrapping all cycle stage errors
//!
//! # Usage
//!
//! ```rust,ignore
//! use homework_bot::error::{BotErrorTrait, Error};
//!
//! fn diagnostic(err: &Error) -> String {
//!     format!("{} ({})", err.localized_desc(), err.category().localized_desc())
//! }
//! ```

use thiserror::Error;

// Re-export stage errors for convenience
pub use crate::utils::error::{FetchError, TranslationError, ValidationError};

/// Common trait for all poll cycle error types
pub trait BotErrorTrait: std::error::Error {
    /// Get the Russian description used in chat diagnostics
    fn localized_desc(&self) -> String;

    /// Get the error category for log records
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for log records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Status API unreachable or answering with an error status
    Network,
    /// Payload shape or content errors
    Parsing,
}

impl ErrorCategory {
    /// Get Russian description for the category
    pub fn localized_desc(&self) -> &'static str {
        match self {
            Self::Network => "ошибка сети",
            Self::Parsing => "ошибка разбора ответа",
        }
    }
}

/// Unified error type for a poll cycle
#[derive(Error, Debug)]
pub enum Error {
    /// Status API request errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Payload shape errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Status translation errors
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),
}

impl BotErrorTrait for FetchError {
    fn localized_desc(&self) -> String {
        match self {
            Self::Unreachable { endpoint, source } => {
                format!("Недоступность эндпоинта {endpoint} ({source})")
            }
            Self::BadStatus(code) => format!("Получен код ответа {code}"),
            Self::MalformedBody(source) => {
                format!("Невозможно привести ответ из формата JSON ({source})")
            }
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Unreachable { .. } | Self::BadStatus(_) => ErrorCategory::Network,
            Self::MalformedBody(_) => ErrorCategory::Parsing,
        }
    }
}

impl BotErrorTrait for ValidationError {
    fn localized_desc(&self) -> String {
        match self {
            Self::NotAMapping => "Ответ не является словарем".to_string(),
            Self::MissingKeys(keys) => {
                format!("Отсутствие ожидаемых ключей в ответе API: {}", keys.join(", "))
            }
            Self::WrongFieldType { field } => format!("Ответ не содержит список {field}"),
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Parsing
    }
}

impl BotErrorTrait for TranslationError {
    fn localized_desc(&self) -> String {
        match self {
            Self::MissingName => "Отсутствует ключ homework_name в ответе API".to_string(),
            Self::UnknownStatus(code) => {
                format!("Неожиданный статус - {code} - домашней работы в ответе API")
            }
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Parsing
    }
}

impl BotErrorTrait for Error {
    fn localized_desc(&self) -> String {
        match self {
            Self::Fetch(e) => e.localized_desc(),
            Self::Validation(e) => e.localized_desc(),
            Self::Translation(e) => e.localized_desc(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Fetch(e) => e.category(),
            Self::Validation(e) => e.category(),
            Self::Translation(e) => e.category(),
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
