//! `SeaORM` Entity for the compliance_documents table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "compliance_documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub pack_id: String,
    pub document_type: String,
    pub title: String,
    pub reference_number: String,
    pub issued_by: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub content_type: String,
    pub file_name: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
