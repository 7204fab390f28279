use thiserror::Error;

/// Application-wide error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// The content store could not be read at all. Retryable and alarm-worthy,
    /// unlike a missing record.
    #[error("Content store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Helper conversion from anyhow::Error
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Why a single stored record was rejected.
///
/// Never surfaced to readers of the collection: the reader logs it and treats
/// the record as absent.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("missing front matter block")]
    MissingFrontMatter,

    #[error("unterminated front matter block")]
    UnterminatedFrontMatter,

    #[error("invalid front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid field `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("content is not valid UTF-8")]
    Encoding,
}

impl RecordError {
    /// The front matter key this error points at, for author-facing reports.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            RecordError::MissingField(field) => Some(field),
            RecordError::InvalidField { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_error_field() {
        assert_eq!(RecordError::MissingField("author").field(), Some("author"));
        let invalid = RecordError::InvalidField {
            field: "date",
            reason: "not a date".to_string(),
        };
        assert_eq!(invalid.field(), Some("date"));
        assert_eq!(RecordError::MissingFrontMatter.field(), None);
    }

    #[test]
    fn test_record_error_display() {
        let err = RecordError::MissingField("author");
        assert_eq!(err.to_string(), "missing required field `author`");
    }

    #[test]
    fn test_store_unavailable_display() {
        let err = AppError::StoreUnavailable("permission denied".to_string());
        assert_eq!(err.to_string(), "Content store unavailable: permission denied");
    }
}
