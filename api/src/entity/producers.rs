//! `SeaORM` Entity for the producers table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "producers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub county: String,
    pub district: String,
    pub gps_coordinates: Option<String>,
    /// JSON array of farm parcel ids
    pub farm_ids: Json,
    pub commodity: Option<String>,
    pub farm_size_hectares: Option<f64>,
    pub registered_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
