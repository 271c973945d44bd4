use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShoppiesError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Shared list is not a JSON array of identifiers: {message}")]
    InvalidSharedList { message: String },

    #[error("Nomination list already holds {max} movies")]
    NominationsFull { max: usize },

    #[error("Movie {id} is already nominated")]
    AlreadyNominated { id: String },

    #[error("Movie {id} is not in the current search results")]
    NotInResults { id: String },

    #[error("No catalog entry for {id}: {message}")]
    UnknownMovie { id: String, message: String },

    #[error("Clipboard error: {message}")]
    ClipboardError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Configuration,
    Data,
    Nomination,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit status for a run that ended with this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 2,
            ErrorSeverity::Medium => 3,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 4,
        }
    }
}

impl ShoppiesError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ShoppiesError::ApiError(_) => ErrorCategory::Network,
            ShoppiesError::IoError(_) | ShoppiesError::StorageError { .. } => ErrorCategory::Storage,
            ShoppiesError::ConfigError { .. }
            | ShoppiesError::MissingConfigError { .. }
            | ShoppiesError::InvalidConfigValueError { .. }
            | ShoppiesError::UrlError(_) => ErrorCategory::Configuration,
            ShoppiesError::SerializationError(_) | ShoppiesError::InvalidSharedList { .. } => {
                ErrorCategory::Data
            }
            ShoppiesError::NominationsFull { .. }
            | ShoppiesError::AlreadyNominated { .. }
            | ShoppiesError::NotInResults { .. }
            | ShoppiesError::UnknownMovie { .. } => ErrorCategory::Nomination,
            ShoppiesError::ClipboardError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Nomination => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Storage | ErrorCategory::System => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// Short message suitable for showing in the results panel or on stderr.
    pub fn user_friendly_message(&self) -> String {
        match self {
            ShoppiesError::ApiError(e) if e.is_timeout() => {
                "The movie catalog took too long to answer".to_string()
            }
            ShoppiesError::ApiError(_) => "Could not reach the movie catalog".to_string(),
            ShoppiesError::SerializationError(_) => {
                "The movie catalog sent a response we could not read".to_string()
            }
            ShoppiesError::MissingConfigError { field } => {
                format!("Missing required setting: {}", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ShoppiesError::ApiError(_) => "Check your network connection and try again",
            ShoppiesError::MissingConfigError { .. } => {
                "Set OMDB_API_KEY or pass --api-key / a config file"
            }
            ShoppiesError::InvalidConfigValueError { .. }
            | ShoppiesError::ConfigError { .. }
            | ShoppiesError::UrlError(_) => "Fix the configuration value and run again",
            ShoppiesError::IoError(_) | ShoppiesError::StorageError { .. } => {
                "Check that the storage directory exists and is writable"
            }
            ShoppiesError::SerializationError(_) | ShoppiesError::InvalidSharedList { .. } => {
                "Ask the sender for a fresh share link"
            }
            ShoppiesError::NominationsFull { .. } => "Remove a nomination before adding another",
            ShoppiesError::AlreadyNominated { .. } => "Pick a movie you have not nominated yet",
            ShoppiesError::NotInResults { .. } => "Search for the movie first",
            ShoppiesError::UnknownMovie { .. } => "Check the catalog identifier (e.g. tt0208092)",
            ShoppiesError::ClipboardError { .. } => "Copy the link from the terminal instead",
        }
    }
}

pub type Result<T> = std::result::Result<T, ShoppiesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nomination_errors_are_low_severity() {
        let err = ShoppiesError::NominationsFull { max: 5 };
        assert_eq!(err.category(), ErrorCategory::Nomination);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.to_string(), "Nomination list already holds 5 movies");
    }

    #[test]
    fn test_missing_config_is_critical() {
        let err = ShoppiesError::MissingConfigError {
            field: "omdb.api_key".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(
            err.user_friendly_message(),
            "Missing required setting: omdb.api_key"
        );
    }

    #[test]
    fn test_severity_exit_codes() {
        let err = ShoppiesError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only directory",
        ));
        assert_eq!(err.severity().exit_code(), 1);
        assert_eq!(ErrorSeverity::Low.exit_code(), 2);
        assert_eq!(ErrorSeverity::Medium.exit_code(), 3);
        assert_eq!(ErrorSeverity::Critical.exit_code(), 4);
    }

    #[test]
    fn test_shared_list_error_suggestion() {
        let err = ShoppiesError::InvalidSharedList {
            message: "expected value".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.recovery_suggestion(), "Ask the sender for a fresh share link");
    }
}
