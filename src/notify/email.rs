use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::config::Config;
use crate::error::NotifyError;

use super::dispatcher::Ack;
use super::message;

const BREVO_ENDPOINT: &str = "https://api.brevo.com/v3/smtp/email";

#[derive(Debug, Serialize)]
struct Party<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoEmail<'a> {
    sender: Party<'a>,
    to: Vec<Party<'a>>,
    reply_to: Party<'a>,
    subject: &'a str,
    html_content: String,
    text_content: String,
}

/// Thin client for the transactional email provider. Construction fails fast
/// when the deployment is missing credentials, before any outbound call.
pub struct EmailClient<'a> {
    http: &'a Client,
    api_key: &'a str,
    from_email: &'a str,
    from_name: &'a str,
}

impl<'a> EmailClient<'a> {
    pub fn from_config(http: &'a Client, config: &'a Config) -> Result<Self, NotifyError> {
        let api_key = config
            .brevo_api_key
            .as_deref()
            .ok_or(NotifyError::NotConfigured("Brevo API key"))?;
        let from_email = config
            .mail_from
            .as_deref()
            .ok_or(NotifyError::NotConfigured("MAIL_FROM"))?;
        Ok(Self {
            http,
            api_key,
            from_email,
            from_name: &config.mail_from_name,
        })
    }

    pub async fn send(&self, to: &str, name: &str) -> Result<Ack, NotifyError> {
        let (html_content, text_content) =
            message::render_email(name).map_err(NotifyError::Template)?;

        let sender = Party {
            name: self.from_name,
            email: self.from_email,
        };
        let payload = BrevoEmail {
            to: vec![Party { name, email: to }],
            reply_to: Party {
                name: self.from_name,
                email: self.from_email,
            },
            subject: message::EMAIL_SUBJECT,
            html_content,
            text_content,
            sender,
        };

        let response = self
            .http
            .post(BREVO_ENDPOINT)
            .header("api-key", self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.is_success() {
            info!("email sent to {to}");
            let message_id = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("messageId").and_then(Value::as_str).map(String::from));
            return Ok(Ack { message_id });
        }

        Err(match status.as_u16() {
            401 => NotifyError::InvalidApiKey(body),
            400 => NotifyError::BadRequest(body),
            403 => NotifyError::DomainNotVerified(body),
            _ => NotifyError::Provider {
                channel: "email",
                details: format!("Brevo API error: {status} - {body}"),
            },
        })
    }
}
