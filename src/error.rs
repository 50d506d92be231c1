// src/error.rs
use reqwest::StatusCode;
use thiserror::Error;

use crate::validation::ValidationError;

pub type Result<T, E = ProviderError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("provider configuration: {0}")]
    Config(String),

    #[error("invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("PowerDNS request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("PowerDNS API returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("record set '{name}' (type '{rrtype}') not found in zone '{zone_id}'")]
    RecordSetNotFound {
        zone_id: String,
        name: String,
        rrtype: String,
    },

    #[error("ID '{id}' should be in format '{expected}'")]
    InvalidImportId { id: String, expected: &'static str },
}

impl ProviderError {
    pub fn config(msg: impl Into<String>) -> Self {
        ProviderError::Config(msg.into())
    }

    /// True for errors that mean the remote object does not exist, either
    /// because the server said 404 or because the zone lacks the rrset.
    pub fn is_not_found(&self) -> bool {
        match self {
            ProviderError::Api { status, .. } => *status == StatusCode::NOT_FOUND,
            ProviderError::RecordSetNotFound { .. } => true,
            _ => false,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ProviderError::Api { status, .. } => Some(*status),
            ProviderError::Http(err) => err.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_classification() {
        let missing_zone = ProviderError::Api {
            status: StatusCode::NOT_FOUND,
            message: "Not Found".into(),
        };
        assert!(missing_zone.is_not_found());
        assert_eq!(missing_zone.status(), Some(StatusCode::NOT_FOUND));

        let missing_rrset = ProviderError::RecordSetNotFound {
            zone_id: "example.com.".into(),
            name: "www.example.com.".into(),
            rrtype: "A".into(),
        };
        assert!(missing_rrset.is_not_found());
        assert_eq!(missing_rrset.status(), None);

        let conflict = ProviderError::Api {
            status: StatusCode::CONFLICT,
            message: "Conflict".into(),
        };
        assert!(!conflict.is_not_found());
    }

    #[test]
    fn import_id_message_names_expected_format() {
        let err = ProviderError::InvalidImportId {
            id: "localhost".into(),
            expected: "server_id/zone_id",
        };
        assert_eq!(
            err.to_string(),
            "ID 'localhost' should be in format 'server_id/zone_id'"
        );
    }
}
