//! Error types for the moveez CLI

use thiserror::Error;

/// Result type alias for moveez operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for the remote-call layer.
///
/// Kept separate from [`Result`] because in-flight outcomes are shared
/// between callers and therefore must be `Clone`.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Follow-up advice printed under the error message
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Error::Api(api) => match api.status()? {
                401 => Some("Check your API keys with `moveez status`."),
                429 => Some("Rate limited by the API, try again shortly."),
                _ => None,
            },
            _ => None,
        }
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Remote API errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (offline, DNS, refused, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a non-2xx status.
    #[error("Upstream error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The body of a successful response could not be decoded.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status of an upstream failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found at {0}. Run `moveez init` to set up.")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("TMDB API key not set. Run `moveez init` or set MOVEEZ_TMDB_KEY.")]
    MissingTmdbKey,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_network() {
        let err = ApiError::Network("Connection refused".to_string());
        assert!(err.to_string().contains("Connection refused"));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_api_error_upstream_carries_status_and_message() {
        let err = ApiError::Upstream {
            status: 404,
            message: "The resource you requested could not be found.".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("could not be found"));
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_hint_for_rejected_key() {
        let err: Error = ApiError::Upstream {
            status: 401,
            message: "Invalid API key".to_string(),
        }
        .into();
        assert!(err.hint().unwrap().contains("moveez status"));

        let err: Error = ApiError::Upstream {
            status: 404,
            message: "not found".to_string(),
        }
        .into();
        assert_eq!(err.hint(), None);
        assert_eq!(Error::InvalidInput("x".to_string()).hint(), None);
    }

    #[test]
    fn test_api_error_invalid_response() {
        let err = ApiError::InvalidResponse("expected value at line 1".to_string());
        assert!(err.to_string().contains("expected value"));
    }

    #[test]
    fn test_api_error_is_clone_and_comparable() {
        let err = ApiError::Upstream {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.clone(), err);
    }

    #[test]
    fn test_config_error_missing_tmdb_key() {
        let err = ConfigError::MissingTmdbKey;
        let msg = err.to_string();
        assert!(msg.contains("moveez init"));
        assert!(msg.contains("MOVEEZ_TMDB_KEY"));
    }

    #[test]
    fn test_config_error_not_found_includes_path() {
        let err = ConfigError::NotFound("/tmp/nope.yaml".to_string());
        assert!(err.to_string().contains("/tmp/nope.yaml"));
    }

    #[test]
    fn test_error_from_api_error() {
        let err: Error = ApiError::Network("offline".to_string()).into();

        match err {
            Error::Api(ApiError::Network(_)) => (),
            _ => panic!("Expected Error::Api(ApiError::Network)"),
        }
    }

    #[test]
    fn test_error_from_config_error() {
        let err: Error = ConfigError::MissingTmdbKey.into();

        match err {
            Error::Config(ConfigError::MissingTmdbKey) => (),
            _ => panic!("Expected Error::Config(ConfigError::MissingTmdbKey)"),
        }
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("invalid: [yaml: content")
            .unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }
}
