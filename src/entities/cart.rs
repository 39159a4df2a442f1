use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cart record. Line items are stored as a JSON array; only the data shape
/// is fixed, merge and checkout semantics are intentionally absent.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cart")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub code: Option<i32>,
    pub items: Json,
}

/// One line in a cart, as serialized into [`Model::items`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub cover_url: Option<String>,
    pub name: String,
    pub slug: String,
    pub quantity: i64,
    pub subtotal: f64,
    pub total: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
