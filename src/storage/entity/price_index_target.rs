use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Scenario-specific competitive index target.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "price_index_targets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub scenario_id: i32,
    pub opstudy_id: i32,
    pub zone: String, // zone id as text, or "all"
    pub primary_secondary: String,
    pub promo_status: String,
    pub competitor_type: String,
    pub kvi_class: String,
    pub actual_index: Option<i32>,
    pub index_min: Option<i32>,
    pub index_max: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pricing_scenario::Entity",
        from = "Column::ScenarioId",
        to = "super::pricing_scenario::Column::Id"
    )]
    PricingScenario,
}

impl ActiveModelBehavior for ActiveModel {}
