use reqwest::Client;
use tracing::info;

use crate::config::Config;
use crate::contact::phone::normalize_number;
use crate::error::NotifyError;

use super::dispatcher::Ack;
use super::message;

/// Client for the WhatsApp messaging provider (Twilio Messages API).
pub struct WhatsAppClient<'a> {
    http: &'a Client,
    account_sid: &'a str,
    auth_token: &'a str,
    from_number: &'a str,
    country_code: &'a str,
}

impl<'a> WhatsAppClient<'a> {
    pub fn from_config(http: &'a Client, config: &'a Config) -> Result<Self, NotifyError> {
        match (
            config.twilio_account_sid.as_deref(),
            config.twilio_auth_token.as_deref(),
            config.twilio_whatsapp_from.as_deref(),
        ) {
            (Some(account_sid), Some(auth_token), Some(from_number)) => Ok(Self {
                http,
                account_sid,
                auth_token,
                from_number,
                country_code: &config.country_code,
            }),
            _ => Err(NotifyError::NotConfigured("Twilio credentials")),
        }
    }

    pub async fn send(&self, to: &str, name: &str) -> Result<Ack, NotifyError> {
        let formatted = normalize_number(to, self.country_code);
        let body = message::render_whatsapp(name).map_err(NotifyError::Template)?;

        let endpoint = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.account_sid
        );
        let params = [
            ("From", self.from_number.to_string()),
            ("To", format!("whatsapp:{formatted}")),
            ("Body", body),
        ];

        let response = self
            .http
            .post(&endpoint)
            .basic_auth(self.account_sid, Some(self.auth_token))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            return Err(NotifyError::Provider {
                channel: "WhatsApp",
                details: format!("Twilio API error: {status} - {details}"),
            });
        }

        info!("WhatsApp sent to {formatted}");
        Ok(Ack { message_id: None })
    }
}
