//! Netatmo-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetatmoError {
    /// The data endpoint still answered 401 after the one-time token
    /// refresh and replay.
    #[error("Unauthorized - credentials rejected after token refresh")]
    Unauthorized,

    #[error("API error: {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Parse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl NetatmoError {
    /// Whether this error indicates the stored credentials are unusable,
    /// as opposed to a transient transport problem.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_is_auth_failure() {
        assert!(NetatmoError::Unauthorized.is_auth_failure());
        assert!(!NetatmoError::Parse("bad json".into()).is_auth_failure());
    }

    #[test]
    fn test_api_error_display() {
        let err = NetatmoError::Api {
            status: 503,
            message: "maintenance".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("maintenance"));
    }
}
