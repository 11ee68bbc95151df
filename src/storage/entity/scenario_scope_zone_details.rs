use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Finest-grained fact row: one per (scope, zone).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "scenario_scope_zone_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub scope_id: i32,
    pub zone_id: i32,

    pub elasticity: Option<f64>,
    pub baseline_base_price_units: Option<f64>,
    pub baseline_base_price: Option<f64>,
    pub gradient: Option<f64>,

    // baseline
    pub curr_gp: Option<f64>,
    pub curr_sales: Option<f64>,
    pub curr_units: Option<f64>,

    // simulated at the suggested price
    pub total_gp: Option<f64>,
    pub total_sales: Option<f64>,
    pub total_units: Option<f64>,

    pub primary_comp_price: Option<f64>,
    pub primary_comp_units: Option<f64>,
    pub primary_comp_price_api: Option<f64>,
    pub primary_comp_units_api: Option<f64>,
    pub secondary_comp_price: Option<f64>,
    pub secondary_comp_units: Option<f64>,
    pub secondary_comp_price_api: Option<f64>,
    pub secondary_comp_units_api: Option<f64>,

    pub discount_pct: Option<f64>,

    pub ppu_violation: bool,
    pub plg_violation: bool,
    pub price_rounding_violation: bool,
    pub zone_violation: bool,

    pub rationale: String,
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
    #[sea_orm(
        belongs_to = "super::zone::Entity",
        from = "Column::ZoneId",
        to = "super::zone::Column::Id"
    )]
    Zone,
}

impl Related<super::pricing_scenario_scope::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PricingScenarioScope.def()
    }
}

impl Related<super::zone::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Zone.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
