//! `SeaORM` Entity for the compliance_packs table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "compliance_packs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub pack_id: String,
    pub producer_id: String,
    pub assessment_id: Uuid,
    /// Exporter and shipment metadata as JSON
    pub exporter: Json,
    pub status: String,
    pub storage_expiry_date: DateTimeWithTimeZone,
    pub generated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
