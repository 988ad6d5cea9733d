use anyhow::Context;
use sea_orm::DatabaseConnection;
use sea_orm_migration::prelude::*;

mod initial_001;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(initial_001::Migration)]
    }
}

/// Applies all pending migrations.
///
/// # Errors
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run(db: &DatabaseConnection) -> anyhow::Result<()> {
    Migrator::up(db, None)
        .await
        .context("failed to apply calculator migrations")?;
    tracing::info!("Calculator migrations applied");
    Ok(())
}
