use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::expr;
use super::history::{HistoryStore, MAX_HISTORY_LIMIT};
use super::model::CalculationRecord;
use super::repo::HistoryRepository;
use super::validator::validate_expression;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Number of records the history page shows.
    pub history_limit: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            history_limit: MAX_HISTORY_LIMIT,
        }
    }
}

/// Validate → evaluate → persist pipeline behind the REST handlers.
pub struct Service {
    history: HistoryStore,
    config: ServiceConfig,
}

impl Service {
    pub fn new(repo: Arc<dyn HistoryRepository>, config: ServiceConfig) -> Self {
        Self {
            history: HistoryStore::new(repo),
            config,
        }
    }

    /// Evaluates `expression` and records it in the history.
    ///
    /// A failed history write does not fail the calculation.
    ///
    /// # Errors
    /// Returns [`DomainError::DisallowedCharacters`] before any parsing when
    /// the input leaves the arithmetic alphabet, and
    /// [`DomainError::Evaluation`] when it is not a computable expression.
    /// Nothing is persisted in either case.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn calculate(&self, expression: &str) -> Result<f64, DomainError> {
        if let Err(e) = validate_expression(expression) {
            tracing::debug!(error = %e, "Expression rejected");
            return Err(e);
        }

        let result = expr::evaluate(expression).inspect_err(|e| {
            tracing::debug!(error = %e, "Expression failed to evaluate");
        })?;

        let saved = self.history.save(expression, result).await;
        tracing::debug!(result, saved, "Calculation completed");
        Ok(result)
    }

    pub async fn history(&self) -> Vec<CalculationRecord> {
        self.history.list_recent(self.config.history_limit).await
    }
}
