use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "zones")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub zone_code: i32,
    #[sea_orm(unique)]
    pub zone_description: String,
    pub zone_group: Option<String>,
    pub order: Option<i32>,
    pub store_count: i32,
    pub corp_or_market_opt: Option<String>, // corporate / market
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
