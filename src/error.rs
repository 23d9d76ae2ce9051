//! Error types for the localization catalog

use std::path::PathBuf;

use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, LocaleError>;

/// Stable classification of a [`LocaleError`], independent of the storage layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    LocalDoesNotExist,
    LangDoesNotExist,
    LangAlreadyExists,
    SectionDoesNotExist,
    SectionAlreadyExists,
    KeyNotFound,
    KeyAlreadyExists,
    InvalidName,
    Storage,
}

/// Localization catalog errors
#[derive(Error, Debug)]
pub enum LocaleError {
    #[error("Localization directory does not exist: {}", .path.display())]
    LocalDoesNotExist { path: PathBuf },

    #[error("The \"{0}\" language does not exist")]
    LangDoesNotExist(String),

    #[error("Catalog has no languages: {}", .path.display())]
    NoLanguages { path: PathBuf },

    #[error("The \"{0}\" language already exists")]
    LangAlreadyExists(String),

    #[error("Section does not exist: {}", .path.display())]
    SectionDoesNotExist { path: PathBuf },

    #[error("Section already exists: {}", .path.display())]
    SectionAlreadyExists { path: PathBuf },

    #[error("The key \"{key}\" is not in section {}", .path.display())]
    KeyNotFound { key: String, path: PathBuf },

    #[error("Key \"{key}\" already exists in section {}", .path.display())]
    KeyAlreadyExists { key: String, path: PathBuf },

    #[error("Invalid {kind} name: {name:?}")]
    InvalidName { kind: &'static str, name: String },

    #[error("{operation} applied to [{}] but failed at {failed}: {source}", .applied.join(", "))]
    PartiallyApplied {
        operation: String,
        applied: Vec<String>,
        failed: String,
        #[source]
        source: Box<LocaleError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Container format error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl LocaleError {
    /// Domain classification of this error.
    ///
    /// A partial fan-out reports the kind of the step that stopped it.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LocaleError::LocalDoesNotExist { .. } => ErrorKind::LocalDoesNotExist,
            LocaleError::LangDoesNotExist(_) | LocaleError::NoLanguages { .. } => {
                ErrorKind::LangDoesNotExist
            }
            LocaleError::LangAlreadyExists(_) => ErrorKind::LangAlreadyExists,
            LocaleError::SectionDoesNotExist { .. } => ErrorKind::SectionDoesNotExist,
            LocaleError::SectionAlreadyExists { .. } => ErrorKind::SectionAlreadyExists,
            LocaleError::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            LocaleError::KeyAlreadyExists { .. } => ErrorKind::KeyAlreadyExists,
            LocaleError::InvalidName { .. } => ErrorKind::InvalidName,
            LocaleError::PartiallyApplied { source, .. } => source.kind(),
            LocaleError::Io(_) | LocaleError::Json(_) | LocaleError::Walk(_) => ErrorKind::Storage,
        }
    }

    /// Whether some, but not all, languages were mutated before this error
    pub fn is_partial(&self) -> bool {
        matches!(self, LocaleError::PartiallyApplied { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_reports_source_kind() {
        let err = LocaleError::PartiallyApplied {
            operation: "create_key".to_string(),
            applied: vec!["en".to_string()],
            failed: "uk".to_string(),
            source: Box::new(LocaleError::KeyAlreadyExists {
                key: "hello".to_string(),
                path: PathBuf::from("uk/messages.json"),
            }),
        };
        assert!(err.is_partial());
        assert_eq!(err.kind(), ErrorKind::KeyAlreadyExists);
        assert!(err.to_string().contains("failed at uk"));
    }

    #[test]
    fn test_no_languages_message() {
        let err = LocaleError::NoLanguages {
            path: PathBuf::from("lang"),
        };
        assert_eq!(err.kind(), ErrorKind::LangDoesNotExist);
        assert_eq!(err.to_string(), "Catalog has no languages: lang");
    }

    #[test]
    fn test_io_is_storage() {
        let err = LocaleError::from(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(!err.is_partial());
    }
}
