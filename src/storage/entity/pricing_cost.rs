use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pricing_costs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub pln: String,
    pub zone_id: i32,
    pub curr_base_cost: f64,
    pub curr_final_cost: Option<f64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::article::Entity",
        from = "Column::Pln",
        to = "super::article::Column::Pln"
    )]
    Article,
}

impl ActiveModelBehavior for ActiveModel {}
