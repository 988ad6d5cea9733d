use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::CalculationRecord;

#[async_trait]
pub trait HistoryRepository: Send + Sync {
    async fn insert(
        &self,
        expression: &str,
        result: f64,
        created_at: DateTime<Utc>,
    ) -> anyhow::Result<()>;

    /// Most recent records first.
    async fn list_recent(&self, limit: u64) -> anyhow::Result<Vec<CalculationRecord>>;
}
