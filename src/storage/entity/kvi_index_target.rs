use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Global competitive index target, shared by every scenario.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "kvi_index_targets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub opstudy: String, // opstudy id as text, or "all"
    pub zone: String,    // zone id as text, or "all"
    pub kvi_class: String,
    pub primary_secondary: String,
    pub promo_status: String,
    pub competitor_type: String,
    pub index_min: Option<i32>,
    pub index_max: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
