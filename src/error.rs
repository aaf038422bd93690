//! Structured error types for write and import operations.

use serde::Serialize;
use std::fmt;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors
    MissingRequiredField,
    DuplicateName,
    InvalidFieldValue,

    // Import errors
    EmptyImport,
    ImportUnreadable,

    // Internal errors
    StorageUnavailable,
    InternalError,
}

/// Structured error surfaced to the caller of a write or import intent.
///
/// Source-unreachable is deliberately not represented here: the sheet
/// adapter reports that condition as `None`, never as an error.
#[derive(Debug, Serialize)]
pub struct DataError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl DataError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
            details: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors

    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("{} is required", field),
        )
        .with_field(field)
    }

    pub fn duplicate_name(name: &str) -> Self {
        Self::new(
            ErrorCode::DuplicateName,
            format!("A record named {} already exists", name),
        )
        .with_field("full_name")
    }

    pub fn invalid_value(field: &str, reason: &str) -> Self {
        Self::new(ErrorCode::InvalidFieldValue, reason).with_field(field)
    }

    pub fn empty_import() -> Self {
        Self::new(
            ErrorCode::EmptyImport,
            "No usable rows found in the file; check the header row",
        )
    }

    pub fn import_unreadable(err: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::ImportUnreadable,
            "Could not read the file as tabular data",
        )
        .with_details(err.to_string())
    }

    pub fn internal(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InternalError, err.to_string())
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DataError {}

// Allow using ? with anyhow errors by converting them
impl From<anyhow::Error> for DataError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<DataError>() {
            Ok(data_err) => data_err,
            Err(err) => DataError::internal(err),
        }
    }
}

/// Result type for write and import operations.
pub type DataResult<T> = std::result::Result<T, DataError>;
