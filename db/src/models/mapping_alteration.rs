use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// One alteration curated against a mapping. Rows are only ever appended.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "mapping_alterations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[serde(skip_serializing)]
    pub mapping_id: i64,
    pub alteration: String,
    pub gene: String,
    /// How the entry was curated, e.g. `manually`.
    pub curation_method: String,
    #[serde(rename = "type")]
    pub curation_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::mapping::Entity",
        from = "Column::MappingId",
        to = "super::mapping::Column::Id",
        on_delete = "Cascade"
    )]
    Mapping,
}

impl Related<super::mapping::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mapping.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
