//! Append-only calculation history.
//!
//! Persistence failures are part of the contract here, not exceptions: a
//! failed write reports `false` and a failed read yields an empty history.
//! Both are logged and never propagated to the HTTP layer.

use std::sync::Arc;

use chrono::Utc;

use super::model::CalculationRecord;
use super::repo::HistoryRepository;

/// Upper bound on records returned by a single history read.
pub const MAX_HISTORY_LIMIT: u64 = 50;

#[derive(Clone)]
pub struct HistoryStore {
    repo: Arc<dyn HistoryRepository>,
}

impl HistoryStore {
    pub fn new(repo: Arc<dyn HistoryRepository>) -> Self {
        Self { repo }
    }

    /// Appends one record stamped with the current time.
    pub async fn save(&self, expression: &str, result: f64) -> bool {
        let created_at = Utc::now();
        match self.repo.insert(expression, result, created_at).await {
            Ok(()) => {
                tracing::debug!(expression, result, %created_at, "Calculation saved");
                true
            }
            Err(e) => {
                tracing::error!(error = ?e, expression, "Failed to save calculation");
                false
            }
        }
    }

    /// Returns up to `limit` records, newest first; `limit` is clamped to
    /// [`MAX_HISTORY_LIMIT`].
    pub async fn list_recent(&self, limit: u64) -> Vec<CalculationRecord> {
        let limit = limit.min(MAX_HISTORY_LIMIT);
        match self.repo.list_recent(limit).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(error = ?e, limit, "Failed to load calculation history");
                Vec::new()
            }
        }
    }
}
