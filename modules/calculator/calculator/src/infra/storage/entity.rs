use sea_orm::entity::prelude::*;

use crate::domain::model::CalculationRecord;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "calculations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub expression: String,
    #[sea_orm(column_type = "Double")]
    pub result: f64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CalculationRecord {
    fn from(model: Model) -> Self {
        Self {
            expression: model.expression,
            result: model.result,
            created_at: model.created_at,
        }
    }
}
