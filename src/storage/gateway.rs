use async_trait::async_trait;

use crate::record::types::SurveyRecord;

/// Row-insert API of the hosted backend. At-most-once from the caller's
/// side: a failed insert is reported, never retried here.
#[async_trait]
pub trait PersistenceGateway {
    async fn insert(&self, record: &SurveyRecord) -> Result<i64, String>;
}
