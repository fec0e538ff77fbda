use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

const DEFAULT_PORT: &str = "8787";
const DEFAULT_FROM_NAME: &str = "Linkize";
const DEFAULT_COUNTRY_CODE: &str = "55";

/// Runtime configuration, read from the environment once at startup.
/// Provider credentials are optional: a missing value is reported by the
/// affected endpoint as a configuration error instead of crashing here.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub country_code: String,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub brevo_api_key: Option<String>,
    pub mail_from: Option<String>,
    pub mail_from_name: String,
    pub twilio_account_sid: Option<String>,
    pub twilio_auth_token: Option<String>,
    pub twilio_whatsapp_from: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        let config = Self {
            port: try_load("PORT", DEFAULT_PORT),
            country_code: var("DEFAULT_COUNTRY_CODE")
                .unwrap_or_else(|| DEFAULT_COUNTRY_CODE.to_string()),
            supabase_url: var("SUPABASE_URL"),
            supabase_anon_key: var("SUPABASE_ANON_KEY"),
            brevo_api_key: var("BREVO_API_KEY"),
            mail_from: var("MAIL_FROM"),
            mail_from_name: var("MAIL_FROM_NAME").unwrap_or_else(|| DEFAULT_FROM_NAME.to_string()),
            twilio_account_sid: var("TWILIO_ACCOUNT_SID"),
            twilio_auth_token: var("TWILIO_AUTH_TOKEN"),
            twilio_whatsapp_from: var("TWILIO_WHATSAPP_FROM"),
        };
        config.report();
        config
    }

    fn report(&self) {
        if self.supabase_url.is_none() || self.supabase_anon_key.is_none() {
            warn!("Supabase credentials not set, survey submission is disabled");
        }
        if self.brevo_api_key.is_none() || self.mail_from.is_none() {
            warn!("Email sender not fully configured, /send-email will report a configuration error");
        }
        if self.twilio_account_sid.is_none()
            || self.twilio_auth_token.is_none()
            || self.twilio_whatsapp_from.is_none()
        {
            warn!("Twilio credentials not set, /send-whatsapp will report a configuration error");
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
