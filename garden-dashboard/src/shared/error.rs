use thiserror::Error;

/// Failure of a single backend request.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Transport(String),

    #[error("Request to {endpoint} failed with status code {status}")]
    Status { endpoint: String, status: u16 },

    #[error("failed to decode {endpoint} response: {message}")]
    Decode { endpoint: String, message: String },
}

impl ApiError {
    /// Map a reqwest error raised while calling `endpoint`.
    pub fn from_reqwest(endpoint: &str, error: reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            }
        } else if error.is_decode() {
            ApiError::Decode {
                endpoint: endpoint.to_string(),
                message: error.to_string(),
            }
        } else {
            ApiError::Transport(error.to_string())
        }
    }
}

/// Invalid dashboard configuration.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid backend url {value:?}: {message}")]
    InvalidUrl { value: String, message: String },

    #[error("invalid duration for {var}: {value:?} (expected milliseconds)")]
    InvalidDuration { var: &'static str, value: String },
}

/// All errors generated in `garden-dashboard`.
///
/// The `Display` text of the fetch errors is what the date-range form shows.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Invalid date format")]
    InvalidDate,

    #[error("Failed to fetch data from backend: {0}")]
    Backend(#[from] ApiError),

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("terminal IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    /// Determine if the error belongs in the form's inline error display.
    #[allow(clippy::match_like_matches_macro)]
    pub fn is_user_facing(&self) -> bool {
        match self {
            DashboardError::InvalidDate | DashboardError::Backend(_) => true,
            _ => false,
        }
    }
}
