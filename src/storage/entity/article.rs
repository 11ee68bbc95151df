use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub pln: String, // planogram id, referenced by price and cost rows
    pub article_id: Option<i32>,
    pub opstudy_id: i32, // mid-level category
    pub price_family: Option<i32>,
    pub description: String,
    pub brand: String,
    pub vendor_name: String,
    pub uom: String,
    pub uom_size: f64,
    pub private_label_ind: Option<i32>,
    pub is_basic: bool,
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
