use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "competitor_weightings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub opstudy_id: i32,
    pub zone: Option<String>, // zone id as text, or "all"
    pub primary_competitor_name: Option<String>,
    pub secondary_competitor_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
