//! Car entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub name: String,
    pub model: String,

    #[sea_orm(nullable)]
    pub feature1: Option<String>,
    #[sea_orm(nullable)]
    pub feature2: Option<String>,
    #[sea_orm(nullable)]
    pub feature3: Option<String>,

    #[sea_orm(column_name = "type")]
    pub car_type: String,

    pub price: f64,
    pub booked: bool,

    /// Optimistic lock counter
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
