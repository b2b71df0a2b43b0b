use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Represents a user in the `users` table.
///
/// Users are provisioned outside this service; curation records only
/// reference them by id and resolve the display name for responses.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Name shown next to curated records.
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::alteration::Entity")]
    Alteration,

    #[sea_orm(has_many = "super::mapping::Entity")]
    Mapping,
}

impl Related<super::alteration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Alteration.def()
    }
}

impl Related<super::mapping::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mapping.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// The creator as embedded in alteration and mapping responses.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub display_name: String,
}

impl From<Model> for UserSummary {
    fn from(user: Model) -> Self {
        Self {
            id: user.id,
            display_name: user.display_name,
        }
    }
}

impl Model {
    pub async fn create(db: &DbConn, username: &str, display_name: &str) -> Result<Model, DbErr> {
        let now = Utc::now();
        let user = ActiveModel {
            username: Set(username.to_owned()),
            display_name: Set(display_name.to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        user.insert(db).await
    }

    pub async fn get_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }
}
