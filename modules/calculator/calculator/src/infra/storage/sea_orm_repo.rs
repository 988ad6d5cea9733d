use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect};

use crate::domain::model::CalculationRecord;
use crate::domain::repo::HistoryRepository;

use super::entity::{self, Entity as CalculationEntity};

/// History repository backed by a pooled sea-orm connection.
///
/// Each call checks one connection out of the pool for a single statement;
/// the connection goes back to the pool when the call returns, whatever the
/// outcome.
#[derive(Clone)]
pub struct SeaOrmHistoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmHistoryRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HistoryRepository for SeaOrmHistoryRepository {
    async fn insert(
        &self,
        expression: &str,
        result: f64,
        created_at: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let active_model = entity::ActiveModel {
            id: ActiveValue::NotSet,
            expression: ActiveValue::Set(expression.to_owned()),
            result: ActiveValue::Set(result),
            created_at: ActiveValue::Set(created_at),
        };

        CalculationEntity::insert(active_model)
            .exec(&self.db)
            .await
            .context("failed to insert calculation")?;

        Ok(())
    }

    async fn list_recent(&self, limit: u64) -> anyhow::Result<Vec<CalculationRecord>> {
        let rows = CalculationEntity::find()
            .order_by_desc(entity::Column::CreatedAt)
            .order_by_desc(entity::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .context("failed to query calculation history")?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
