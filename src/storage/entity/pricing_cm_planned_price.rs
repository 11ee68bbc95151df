use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category-manager override for a (scope, zone). Outranks `pricing_planned_prices`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pricing_cm_planned_prices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub scope_id: i32,
    pub zone_id: i32,
    pub pln: String,
    pub price: Option<f64>,
    pub tiered_multiple: Option<i32>,
    pub tiered_price: Option<f64>,
    pub zone_differential: Option<bool>,
    pub comments: String,
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
