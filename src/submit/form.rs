use crate::error::SubmitError;
use crate::notify::dispatcher::{send_thank_you, NotificationDispatcher};
use crate::record::build::{build_record, has_meaningful_answer};
use crate::record::types::{Answer, AnswerMap};
use crate::storage::gateway::PersistenceGateway;

const MSG_NO_ANSWERS: &str = "Por favor, responda pelo menos uma pergunta antes de enviar.";
const MSG_NO_CONSENT: &str = "É necessário aceitar a Política de Privacidade para enviar.";
const MSG_ALREADY_SENT: &str = "A pesquisa já foi enviada.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

/// One form session: the collected answers, the consent flag and the
/// submission lifecycle. Owned by a single request or UI session, never
/// shared across flows.
#[derive(Debug)]
pub struct SurveyForm {
    answers: AnswerMap,
    consent: bool,
    state: SubmissionState,
}

impl Default for SurveyForm {
    fn default() -> Self {
        Self::new()
    }
}

impl SurveyForm {
    pub fn new() -> Self {
        Self {
            answers: AnswerMap::new(),
            consent: false,
            state: SubmissionState::Idle,
        }
    }

    pub fn set_answer(&mut self, question_id: u32, answer: Answer) {
        self.answers.insert(question_id, answer);
    }

    pub fn clear_answer(&mut self, question_id: u32) {
        self.answers.remove(&question_id);
    }

    pub fn set_consent(&mut self, consent: bool) {
        self.consent = consent;
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Back to a pristine form for another response.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.consent = false;
        self.state = SubmissionState::Idle;
    }

    /// Runs one submission attempt: validate, persist, then best-effort
    /// thank-you dispatch. Validation failures leave the state untouched and
    /// make no network call. A persistence failure moves to `Failed` and the
    /// user may submit again; a dispatch failure never reverts `Succeeded`.
    pub async fn submit<G, D>(&mut self, gateway: &G, dispatcher: &D) -> Result<i64, SubmitError>
    where
        G: PersistenceGateway + Sync,
        D: NotificationDispatcher + Sync,
    {
        match self.state {
            SubmissionState::Idle | SubmissionState::Failed(_) => {}
            _ => return Err(SubmitError::Validation(MSG_ALREADY_SENT.to_string())),
        }
        if !self.consent {
            return Err(SubmitError::Validation(MSG_NO_CONSENT.to_string()));
        }
        if !has_meaningful_answer(&self.answers) {
            return Err(SubmitError::Validation(MSG_NO_ANSWERS.to_string()));
        }

        self.state = SubmissionState::Submitting;
        let record = build_record(&self.answers);

        match gateway.insert(&record).await {
            Ok(id) => {
                self.state = SubmissionState::Succeeded;
                send_thank_you(dispatcher, &record).await;
                Ok(id)
            }
            Err(details) => {
                let err = SubmitError::Persistence(details);
                self.state = SubmissionState::Failed(err.to_string());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{SubmissionState, SurveyForm};
    use crate::error::{NotifyError, SubmitError};
    use crate::notify::dispatcher::{Ack, NotificationDispatcher};
    use crate::record::types::{Answer, SurveyRecord};
    use crate::storage::gateway::PersistenceGateway;

    #[derive(Default)]
    struct FakeGateway {
        fail: bool,
        inserts: Mutex<Vec<SurveyRecord>>,
    }

    #[async_trait]
    impl PersistenceGateway for FakeGateway {
        async fn insert(&self, record: &SurveyRecord) -> Result<i64, String> {
            if self.fail {
                return Err("insert failed with status 500".to_string());
            }
            let mut inserts = self.inserts.lock().expect("lock");
            inserts.push(record.clone());
            Ok(inserts.len() as i64)
        }
    }

    #[derive(Default)]
    struct FakeDispatcher {
        fail: bool,
        emails: Mutex<Vec<(String, String)>>,
        whatsapps: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl NotificationDispatcher for FakeDispatcher {
        async fn send_email(&self, to: &str, name: &str) -> Result<Ack, NotifyError> {
            self.emails
                .lock()
                .expect("lock")
                .push((to.to_string(), name.to_string()));
            if self.fail {
                return Err(NotifyError::InvalidApiKey(String::new()));
            }
            Ok(Ack { message_id: None })
        }

        async fn send_whatsapp(&self, to: &str, name: &str) -> Result<Ack, NotifyError> {
            self.whatsapps
                .lock()
                .expect("lock")
                .push((to.to_string(), name.to_string()));
            if self.fail {
                return Err(NotifyError::Provider {
                    channel: "WhatsApp",
                    details: String::new(),
                });
            }
            Ok(Ack { message_id: None })
        }
    }

    fn text(value: &str) -> Answer {
        Answer::Text(value.to_string())
    }

    #[tokio::test]
    async fn persists_single_answer_and_succeeds() {
        let gateway = FakeGateway::default();
        let dispatcher = FakeDispatcher::default();
        let mut form = SurveyForm::new();
        form.set_consent(true);
        form.set_answer(1, text("Loja Teste"));

        let id = form.submit(&gateway, &dispatcher).await.expect("submit");
        assert_eq!(id, 1);
        assert_eq!(form.state(), &SubmissionState::Succeeded);

        let inserts = gateway.inserts.lock().expect("lock");
        assert_eq!(inserts.len(), 1);
        assert_eq!(inserts[0].get("nome_negocio"), Some(&text("Loja Teste")));
    }

    #[tokio::test]
    async fn emails_opted_in_email_contact() {
        let gateway = FakeGateway::default();
        let dispatcher = FakeDispatcher::default();
        let mut form = SurveyForm::new();
        form.set_consent(true);
        form.set_answer(1, text("Loja"));
        form.set_answer(20, text("Sim, quero participar"));
        form.set_answer(21, text("test@example.com"));

        form.submit(&gateway, &dispatcher).await.expect("submit");

        let emails = dispatcher.emails.lock().expect("lock");
        assert_eq!(
            emails.as_slice(),
            &[("test@example.com".to_string(), "Loja".to_string())]
        );
        assert!(dispatcher.whatsapps.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn whatsapps_opted_in_phone_contact() {
        let gateway = FakeGateway::default();
        let dispatcher = FakeDispatcher::default();
        let mut form = SurveyForm::new();
        form.set_consent(true);
        form.set_answer(1, text("Loja"));
        form.set_answer(20, text("Sim, quero participar"));
        form.set_answer(21, text("11999887766"));

        form.submit(&gateway, &dispatcher).await.expect("submit");

        let whatsapps = dispatcher.whatsapps.lock().expect("lock");
        assert_eq!(
            whatsapps.as_slice(),
            &[("11999887766".to_string(), "Loja".to_string())]
        );
        assert!(dispatcher.emails.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn skips_notification_without_opt_in() {
        let gateway = FakeGateway::default();
        let dispatcher = FakeDispatcher::default();
        let mut form = SurveyForm::new();
        form.set_consent(true);
        form.set_answer(1, text("Loja"));
        form.set_answer(20, text("Não"));
        form.set_answer(21, text("test@example.com"));

        form.submit(&gateway, &dispatcher).await.expect("submit");

        assert_eq!(form.state(), &SubmissionState::Succeeded);
        assert!(dispatcher.emails.lock().expect("lock").is_empty());
        assert!(dispatcher.whatsapps.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn skips_notification_for_unknown_contact() {
        let gateway = FakeGateway::default();
        let dispatcher = FakeDispatcher::default();
        let mut form = SurveyForm::new();
        form.set_consent(true);
        form.set_answer(1, text("Loja"));
        form.set_answer(20, text("Sim, quero participar"));
        form.set_answer(21, text("!@#$%^&*()"));

        form.submit(&gateway, &dispatcher).await.expect("submit");

        assert_eq!(form.state(), &SubmissionState::Succeeded);
        assert!(dispatcher.emails.lock().expect("lock").is_empty());
        assert!(dispatcher.whatsapps.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn blocks_submission_without_answers() {
        let gateway = FakeGateway::default();
        let dispatcher = FakeDispatcher::default();
        let mut form = SurveyForm::new();
        form.set_consent(true);

        let err = form
            .submit(&gateway, &dispatcher)
            .await
            .expect_err("validation");
        assert!(matches!(err, SubmitError::Validation(_)));
        assert!(err
            .to_string()
            .contains("Por favor, responda pelo menos uma pergunta"));
        assert_eq!(form.state(), &SubmissionState::Idle);
        assert!(gateway.inserts.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn blocks_submission_without_consent() {
        let gateway = FakeGateway::default();
        let dispatcher = FakeDispatcher::default();
        let mut form = SurveyForm::new();
        form.set_answer(1, text("Loja"));

        let err = form
            .submit(&gateway, &dispatcher)
            .await
            .expect_err("validation");
        assert!(matches!(err, SubmitError::Validation(_)));
        assert_eq!(form.state(), &SubmissionState::Idle);
        assert!(gateway.inserts.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn fails_when_persistence_rejects() {
        let gateway = FakeGateway {
            fail: true,
            ..FakeGateway::default()
        };
        let dispatcher = FakeDispatcher::default();
        let mut form = SurveyForm::new();
        form.set_consent(true);
        form.set_answer(1, text("Loja"));
        form.set_answer(20, text("Sim, quero participar"));
        form.set_answer(21, text("test@example.com"));

        let err = form
            .submit(&gateway, &dispatcher)
            .await
            .expect_err("persistence");
        assert!(matches!(err, SubmitError::Persistence(_)));
        match form.state() {
            SubmissionState::Failed(message) => {
                assert!(message.contains("Falha ao enviar a pesquisa"));
            }
            other => panic!("unexpected state {other:?}"),
        }
        assert!(dispatcher.emails.lock().expect("lock").is_empty());
        assert!(dispatcher.whatsapps.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn notification_failure_keeps_submission_succeeded() {
        let gateway = FakeGateway::default();
        let dispatcher = FakeDispatcher {
            fail: true,
            ..FakeDispatcher::default()
        };
        let mut form = SurveyForm::new();
        form.set_consent(true);
        form.set_answer(1, text("Loja"));
        form.set_answer(20, text("Sim, quero participar"));
        form.set_answer(21, text("test@example.com"));

        form.submit(&gateway, &dispatcher).await.expect("submit");

        assert_eq!(form.state(), &SubmissionState::Succeeded);
        assert_eq!(dispatcher.emails.lock().expect("lock").len(), 1);
    }

    #[tokio::test]
    async fn allows_resubmission_after_failure() {
        let dispatcher = FakeDispatcher::default();
        let mut form = SurveyForm::new();
        form.set_consent(true);
        form.set_answer(1, text("Loja"));

        let failing = FakeGateway {
            fail: true,
            ..FakeGateway::default()
        };
        form.submit(&failing, &dispatcher).await.expect_err("fails");

        let working = FakeGateway::default();
        form.submit(&working, &dispatcher).await.expect("retries");
        assert_eq!(form.state(), &SubmissionState::Succeeded);
    }

    #[tokio::test]
    async fn reset_returns_to_a_pristine_form() {
        let gateway = FakeGateway::default();
        let dispatcher = FakeDispatcher::default();
        let mut form = SurveyForm::new();
        form.set_consent(true);
        form.set_answer(1, text("Loja"));
        form.submit(&gateway, &dispatcher).await.expect("submit");

        form.reset();
        assert_eq!(form.state(), &SubmissionState::Idle);

        let err = form
            .submit(&gateway, &dispatcher)
            .await
            .expect_err("cleared form has no answers or consent");
        assert!(matches!(err, SubmitError::Validation(_)));
    }

    #[tokio::test]
    async fn rejects_double_submission_after_success() {
        let gateway = FakeGateway::default();
        let dispatcher = FakeDispatcher::default();
        let mut form = SurveyForm::new();
        form.set_consent(true);
        form.set_answer(1, text("Loja"));
        form.submit(&gateway, &dispatcher).await.expect("submit");

        let err = form
            .submit(&gateway, &dispatcher)
            .await
            .expect_err("already sent");
        assert!(matches!(err, SubmitError::Validation(_)));
        assert_eq!(gateway.inserts.lock().expect("lock").len(), 1);
    }
}
