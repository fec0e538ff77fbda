use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors of the submission pipeline itself. Validation never reaches the
/// network; persistence failures are retryable by the user.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Validation(String),

    #[error("Falha ao enviar a pesquisa. Tente novamente.")]
    Persistence(String),

    #[error("{0} not configured")]
    NotConfigured(&'static str),
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        let status = match self {
            SubmitError::Validation(_) => StatusCode::BAD_REQUEST,
            SubmitError::Persistence(_) => StatusCode::BAD_GATEWAY,
            SubmitError::NotConfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let SubmitError::Persistence(details) = &self {
            error!("persistence gateway failed: {details}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Errors of the two notification dispatchers, classified so the route layer
/// and the logs can tell configuration mistakes from provider rejections.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("{0} not configured")]
    NotConfigured(&'static str),

    #[error("Invalid API key")]
    InvalidApiKey(String),

    #[error("Bad request")]
    BadRequest(String),

    #[error("Sender domain not verified")]
    DomainNotVerified(String),

    #[error("Failed to send {channel}")]
    Provider {
        channel: &'static str,
        details: String,
    },

    #[error("Failed to render message template")]
    Template(String),

    #[error("Request failed")]
    Transport(#[from] reqwest::Error),
}

impl NotifyError {
    /// Human-readable detail line for the endpoint response body.
    pub fn details(&self) -> String {
        match self {
            NotifyError::NotConfigured(what) => format!("{what} is missing"),
            NotifyError::InvalidApiKey(_) => {
                "The provider API key is invalid or missing permissions.".to_string()
            }
            NotifyError::BadRequest(details) => details.clone(),
            NotifyError::DomainNotVerified(details) => details.clone(),
            NotifyError::Provider { details, .. } => details.clone(),
            NotifyError::Template(details) => details.clone(),
            NotifyError::Transport(err) => err.to_string(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, NotifyError::NotConfigured(_))
    }
}

#[cfg(test)]
mod tests {
    use super::NotifyError;

    #[test]
    fn configuration_errors_are_distinct_from_provider_errors() {
        assert!(NotifyError::NotConfigured("Brevo API key").is_configuration());
        assert!(!NotifyError::InvalidApiKey(String::new()).is_configuration());
        assert_eq!(
            NotifyError::NotConfigured("MAIL_FROM").to_string(),
            "MAIL_FROM not configured"
        );
    }

    #[test]
    fn provider_errors_name_their_channel() {
        let err = NotifyError::Provider {
            channel: "WhatsApp",
            details: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to send WhatsApp");
        assert_eq!(err.details(), "boom");
    }
}
