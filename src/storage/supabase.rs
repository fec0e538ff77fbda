use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::config::Config;
use crate::error::SubmitError;
use crate::record::types::SurveyRecord;

use super::gateway::PersistenceGateway;

const RESPONSES_TABLE: &str = "survey_responses";

pub struct SupabaseGateway {
    http: Client,
    url: String,
    anon_key: String,
}

impl SupabaseGateway {
    pub fn from_config(http: Client, config: &Config) -> Result<Self, SubmitError> {
        match (
            config.supabase_url.as_deref(),
            config.supabase_anon_key.as_deref(),
        ) {
            (Some(url), Some(anon_key)) => Ok(Self {
                http,
                url: url.trim_end_matches('/').to_string(),
                anon_key: anon_key.to_string(),
            }),
            _ => Err(SubmitError::NotConfigured("Supabase")),
        }
    }
}

#[async_trait]
impl PersistenceGateway for SupabaseGateway {
    async fn insert(&self, record: &SurveyRecord) -> Result<i64, String> {
        let endpoint = format!("{}/rest/v1/{RESPONSES_TABLE}", self.url);
        let response = self
            .http
            .post(&endpoint)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Prefer", "return=representation")
            .json(&[record])
            .send()
            .await
            .map_err(|e| format!("Supabase request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("Supabase insert failed with status {status}"));
        }

        let rows: Vec<Value> = response
            .json()
            .await
            .map_err(|e| format!("Unable to parse Supabase response: {e}"))?;
        rows.first()
            .and_then(|row| row.get("id"))
            .and_then(Value::as_i64)
            .ok_or_else(|| "Supabase insert returned no row id".to_string())
    }
}
