use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// In-market price of an article in a zone. Unique on (pln, zone_id).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pricing_current_prices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub pln: String,
    pub zone_id: i32,
    pub from_date: Option<Date>,
    pub to_date: Option<Date>,
    pub price: f64,
    pub tiered_multiple: Option<i32>,
    pub tiered_price: Option<f64>,
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
    #[sea_orm(
        belongs_to = "super::zone::Entity",
        from = "Column::ZoneId",
        to = "super::zone::Column::Id"
    )]
    Zone,
}

impl ActiveModelBehavior for ActiveModel {}
