use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One article bound to one pricing scenario. Unique on (scenario_id, article_id).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pricing_scenario_scopes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub scenario_id: i32,
    pub article_id: i32,
    pub vendor_funding: Option<f64>,
    pub dept_cost_override: Option<f64>,
    pub dept_cost_override_date: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pricing_scenario::Entity",
        from = "Column::ScenarioId",
        to = "super::pricing_scenario::Column::Id"
    )]
    PricingScenario,
    #[sea_orm(
        belongs_to = "super::article::Entity",
        from = "Column::ArticleId",
        to = "super::article::Column::Id"
    )]
    Article,
    #[sea_orm(has_many = "super::scenario_scope_zone_details::Entity")]
    ZoneDetails,
}

impl Related<super::pricing_scenario::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PricingScenario.def()
    }
}

impl Related<super::article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Article.def()
    }
}

impl Related<super::scenario_scope_zone_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ZoneDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
