use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Allowed national-brand vs own-brand price gap for a role.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "nbob_pairs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub ob_role: String,
    pub min_percent_price_diff: Option<f64>, // 0..=1
    pub max_percent_price_diff: Option<f64>,
    pub min_dollar_price_diff: Option<f64>,
    pub max_dollar_price_diff: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
