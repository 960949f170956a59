use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("could not write log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not read current log content: {0}")]
    Fetch(#[source] ApiError),

    #[error("{path} changed since it was read (version {expected}); re-run to log again")]
    Conflict { path: String, expected: String },

    #[error("log update rejected: {0}")]
    Rejected(#[source] ApiError),

    #[error("remote log content is not valid: {0}")]
    Decode(String),
}

impl PersistError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, PersistError::Conflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = ApiError::Status {
            status: StatusCode::NOT_FOUND,
            body: "{\"message\":\"Not Found\"}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API returned 404 Not Found: {\"message\":\"Not Found\"}"
        );
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_missing_credential_has_no_status() {
        let err = ApiError::MissingCredential("WAKATIME_API_KEY");
        assert_eq!(err.to_string(), "missing credential: WAKATIME_API_KEY");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_conflict_is_distinct() {
        let conflict = PersistError::Conflict {
            path: "README.md".to_string(),
            expected: "abc123".to_string(),
        };
        assert!(conflict.is_conflict());
        assert!(conflict.to_string().contains("re-run"));

        let rejected = PersistError::Rejected(ApiError::Status {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: String::new(),
        });
        assert!(!rejected.is_conflict());
    }
}
