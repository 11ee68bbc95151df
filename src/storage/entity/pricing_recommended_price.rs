use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Model output for a (scope, zone).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pricing_recommended_prices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub scope_id: i32,
    pub zone_id: i32,
    pub pln: String,
    pub price: f64,
    pub tiered_multiple: Option<i32>,
    pub tiered_price: Option<f64>,
    pub units_baseline: Option<f64>,
    pub units_forecast: Option<f64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pricing_scenario_scope::Entity",
        from = "Column::ScopeId",
        to = "super::pricing_scenario_scope::Column::Id"
    )]
    PricingScenarioScope,
}

impl ActiveModelBehavior for ActiveModel {}
