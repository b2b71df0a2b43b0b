use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Audit entry written alongside every mapping mutation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "mapping_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[serde(skip_serializing)]
    pub mapping_id: i64,
    pub date: DateTime<Utc>,
    /// Acting user.
    #[serde(rename = "user")]
    pub user_id: i64,
    pub operation_type: String,
    pub alteration: String,
    pub gene: String,
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
