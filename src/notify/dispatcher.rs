use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::Config;
use crate::contact::classify::{classify, ContactKind};
use crate::error::NotifyError;
use crate::record::columns;
use crate::record::types::SurveyRecord;

use super::email::EmailClient;
use super::whatsapp::WhatsAppClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub message_id: Option<String>,
}

/// Outbound notification channel, one call per submission per channel.
#[async_trait]
pub trait NotificationDispatcher {
    async fn send_email(&self, to: &str, name: &str) -> Result<Ack, NotifyError>;
    async fn send_whatsapp(&self, to: &str, name: &str) -> Result<Ack, NotifyError>;
}

/// Production dispatcher backed by the configured providers.
#[derive(Clone)]
pub struct ProviderDispatcher {
    http: Client,
    config: Config,
}

impl ProviderDispatcher {
    pub fn new(http: Client, config: Config) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl NotificationDispatcher for ProviderDispatcher {
    async fn send_email(&self, to: &str, name: &str) -> Result<Ack, NotifyError> {
        let client = EmailClient::from_config(&self.http, &self.config)?;
        client.send(to, name).await
    }

    async fn send_whatsapp(&self, to: &str, name: &str) -> Result<Ack, NotifyError> {
        let client = WhatsAppClient::from_config(&self.http, &self.config)?;
        client.send(to, name).await
    }
}

/// Best-effort thank-you dispatch after a successful submission. Runs only
/// when the respondent opted in and left a contact; the contact's shape
/// picks the channel. Failures are logged and swallowed: this call must
/// never affect the outcome of an already-persisted submission.
pub async fn send_thank_you<D: NotificationDispatcher>(dispatcher: &D, record: &SurveyRecord) {
    let opted_in = record
        .get(columns::NOTIFY_OPT_IN)
        .and_then(|answer| answer.as_text())
        .map(|value| value == columns::NOTIFY_OPT_IN_YES)
        .unwrap_or(false);
    if !opted_in {
        return;
    }

    let Some(contact) = record
        .get(columns::CONTACT)
        .and_then(|answer| answer.as_text())
    else {
        return;
    };

    let name = record
        .get(columns::BUSINESS_NAME)
        .and_then(|answer| answer.as_text())
        .unwrap_or("");

    let outcome = match classify(contact) {
        ContactKind::Email => dispatcher.send_email(contact, name).await,
        ContactKind::Phone => dispatcher.send_whatsapp(contact, name).await,
        ContactKind::Unknown => {
            debug!("contact is neither email nor phone, skipping thank-you message");
            return;
        }
    };

    if let Err(err) = outcome {
        warn!("thank-you dispatch failed: {err} ({})", err.details());
    }
}
