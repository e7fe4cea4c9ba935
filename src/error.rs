//! Error types for the fine engine.

use crate::record::RecordId;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Errors that can occur while loading a snapshot or computing fines.
#[derive(Error, Debug)]
pub enum LibraryError {
    /// Failed to open or read an input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON snapshot could not be decoded
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV output error
    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    /// A loan's due or return date is absent or not a calendar date
    #[error("Malformed {field} on loan {loan_id}: {}", describe_value(.value))]
    MalformedDate {
        loan_id: RecordId,
        field: &'static str,
        value: Option<String>,
    },

    /// Invalid command-line value
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

fn describe_value(value: &Option<String>) -> String {
    match value {
        Some(v) => format!("{:?} is not a calendar date", v),
        None => "value is missing".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_date_message_includes_value() {
        let err = LibraryError::MalformedDate {
            loan_id: RecordId::from("7"),
            field: "dueDate",
            value: Some("next tuesday".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Malformed dueDate on loan 7: \"next tuesday\" is not a calendar date"
        );
    }

    #[test]
    fn test_malformed_date_message_for_missing_value() {
        let err = LibraryError::MalformedDate {
            loan_id: RecordId::from("7"),
            field: "dueDate",
            value: None,
        };
        assert_eq!(err.to_string(), "Malformed dueDate on loan 7: value is missing");
    }
}
