use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
pub enum ScenarioType {
    #[sea_orm(string_value = "OPTIMIZATION")]
    Optimization,
    #[sea_orm(string_value = "ADHOC")]
    Adhoc,
}

/// Run status. Variants are declared in lifecycle order so `Ord` compares
/// how far a scenario has progressed.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, EnumIter, DeriveActiveEnum, Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
pub enum ScenarioStatus {
    #[sea_orm(string_value = "ARCHIVED")]
    Archived,
    #[sea_orm(string_value = "TIMEOUT")]
    Timeout,
    #[sea_orm(string_value = "FAILED")]
    Failed,
    #[sea_orm(string_value = "SETUP")]
    Setup,
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "RUNNING")]
    Running,
    #[sea_orm(string_value = "DONE")]
    Done,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, EnumIter, DeriveActiveEnum, Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
pub enum ApprovalStatus {
    #[sea_orm(string_value = "DRAFT")]
    Draft,
    #[sea_orm(string_value = "SUBMITTED")]
    Submitted,
    #[sea_orm(string_value = "APPROVED")]
    Approved,
}

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
pub enum ScenarioObjective {
    #[sea_orm(string_value = "gp")]
    Profit,
    #[sea_orm(string_value = "sales")]
    Revenue,
    #[sea_orm(string_value = "units")]
    Volume,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pricing_scenarios")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub slug: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
    pub fiscal_year: Option<i32>,
    pub cost_override: bool,
    #[sea_orm(column_name = "type")]
    pub scenario_type: ScenarioType,
    pub status: ScenarioStatus,
    pub approval_status: ApprovalStatus,
    pub objective: ScenarioObjective,

    // optimizer constraints
    pub max_price_increase: f64,
    pub max_price_decrease: f64,
    pub max_weighted_average_price_change: f64,
    pub max_number_of_price_changes: Option<i32>,
    pub max_number_of_kvi_price_changes: Option<i32>,
    pub price_below_cogs: bool,
    pub constraints_json: String, // JSON array

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::pricing_scenario_scope::Entity")]
    PricingScenarioScope,
}

impl Related<super::pricing_scenario_scope::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PricingScenarioScope.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
