use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::catalog::Question;
use crate::error::{NotifyError, SubmitError};
use crate::notify::dispatcher::NotificationDispatcher;
use crate::record::types::AnswerMap;
use crate::state::AppState;
use crate::submit::form::SurveyForm;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub survey_data: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppRequest {
    pub phone: String,
    pub name: String,
    #[serde(default)]
    pub survey_data: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(default)]
    pub answers: AnswerMap,
    #[serde(default)]
    pub consent: bool,
}

pub async fn questions_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Question>> {
    Json(state.catalog.clone())
}

pub async fn submit_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<Value>, SubmitError> {
    let gateway = state.gateway()?;
    let dispatcher = state.dispatcher();

    let mut form = SurveyForm::new();
    form.set_consent(request.consent);
    for (question_id, answer) in request.answers {
        form.set_answer(question_id, answer);
    }

    let id = form.submit(&gateway, &dispatcher).await?;
    Ok(Json(json!({ "success": true, "id": id })))
}

pub async fn send_email_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EmailRequest>,
) -> Response {
    debug!("processing email request for {}", request.email);
    log_survey_context(&request.survey_data);

    match state
        .dispatcher()
        .send_email(&request.email, &request.name)
        .await
    {
        Ok(ack) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Email sent successfully",
                "messageId": ack.message_id.unwrap_or_else(|| "unknown".to_string()),
            })),
        )
            .into_response(),
        Err(err) => {
            error!("email dispatch failed: {err} ({})", err.details());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(email_error_body(&err)),
            )
                .into_response()
        }
    }
}

pub async fn send_whatsapp_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<WhatsAppRequest>,
) -> Response {
    debug!("processing whatsapp request for {}", request.phone);
    log_survey_context(&request.survey_data);

    match state
        .dispatcher()
        .send_whatsapp(&request.phone, &request.name)
        .await
    {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "success": true, "message": "WhatsApp sent successfully" })),
        )
            .into_response(),
        Err(err) => {
            error!("whatsapp dispatch failed: {err} ({})", err.details());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(whatsapp_error_body(&err)),
            )
                .into_response()
        }
    }
}

fn log_survey_context(survey_data: &Option<Value>) {
    if let Some(data) = survey_data {
        let fields = data.as_object().map_or(0, |object| object.len());
        debug!("request carries survey context with {fields} fields");
    }
}

fn email_error_body(err: &NotifyError) -> Value {
    if err.is_configuration() {
        return json!({ "error": err.to_string() });
    }
    json!({
        "error": err.to_string(),
        "details": err.details(),
        "timestamp": Utc::now().to_rfc3339(),
    })
}

fn whatsapp_error_body(err: &NotifyError) -> Value {
    if err.is_configuration() {
        return json!({ "error": err.to_string() });
    }
    json!({ "error": err.to_string(), "details": err.details() })
}

#[cfg(test)]
mod tests {
    use super::{email_error_body, whatsapp_error_body};
    use crate::error::NotifyError;

    #[test]
    fn configuration_errors_omit_provider_details() {
        let body = email_error_body(&NotifyError::NotConfigured("Brevo API key"));
        assert_eq!(body["error"], "Brevo API key not configured");
        assert!(body.get("details").is_none());
        assert!(body.get("timestamp").is_none());
    }

    #[test]
    fn email_provider_errors_carry_details_and_timestamp() {
        let body = email_error_body(&NotifyError::InvalidApiKey("401".to_string()));
        assert_eq!(body["error"], "Invalid API key");
        assert!(body["details"].as_str().is_some());
        assert!(body["timestamp"].as_str().is_some());
    }

    #[test]
    fn whatsapp_provider_errors_carry_details_only() {
        let body = whatsapp_error_body(&NotifyError::Provider {
            channel: "WhatsApp",
            details: "Twilio API error: 400".to_string(),
        });
        assert_eq!(body["error"], "Failed to send WhatsApp");
        assert_eq!(body["details"], "Twilio API error: 400");
        assert!(body.get("timestamp").is_none());
    }
}
