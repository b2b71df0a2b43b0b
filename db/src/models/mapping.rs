use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{QueryFilter, QueryOrder, TransactionTrait};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::mapping_alteration;
use super::mapping_log;
use super::user::{self, UserSummary};

/// Links a clinical-trial identifier to the alterations curated against it.
///
/// The curated entries and the audit log live in `mapping_alterations` and
/// `mapping_logs`; see [`MappingDocument`] for the assembled view.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "mappings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub nct_id: String,
    pub complete_status: CompleteStatus,
    /// Creator of the mapping.
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Coarse progress of a mapping.
///
/// Stored and serialized as the strings `"1"` and `"2"`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[sea_orm(
    rs_type = "String",
    db_type = "Enum",
    enum_name = "mapping_complete_status"
)]
pub enum CompleteStatus {
    /// Exactly one alteration curated so far.
    #[sea_orm(string_value = "1")]
    #[serde(rename = "1")]
    #[strum(serialize = "1")]
    Initial,

    /// Two or more alterations curated.
    #[sea_orm(string_value = "2")]
    #[serde(rename = "2")]
    #[strum(serialize = "2")]
    InProgress,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,

    #[sea_orm(has_many = "super::mapping_alteration::Entity")]
    MappingAlteration,

    #[sea_orm(has_many = "super::mapping_log::Entity")]
    MappingLog,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::mapping_alteration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MappingAlteration.def()
    }
}

impl Related<super::mapping_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MappingLog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// An alteration entry about to be appended to a mapping.
#[derive(Clone, Debug, PartialEq)]
pub struct NewMappingAlteration {
    pub alteration: String,
    pub gene: String,
    pub curation_method: String,
    pub curation_type: Option<String>,
}

/// An audit entry about to be appended to a mapping.
#[derive(Clone, Debug, PartialEq)]
pub struct NewLogEntry {
    pub date: DateTime<Utc>,
    pub user_id: i64,
    pub operation_type: String,
    pub alteration: String,
    pub gene: String,
}

/// A mapping with its entries, audit log and creator, in insertion order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MappingDocument {
    #[serde(flatten)]
    pub mapping: Model,
    pub user: Option<UserSummary>,
    pub alterations: Vec<mapping_alteration::Model>,
    pub log: Vec<mapping_log::Model>,
}

async fn insert_entries<C>(
    conn: &C,
    mapping_id: i64,
    entry: NewMappingAlteration,
    log_entry: NewLogEntry,
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    mapping_alteration::ActiveModel {
        mapping_id: Set(mapping_id),
        alteration: Set(entry.alteration),
        gene: Set(entry.gene),
        curation_method: Set(entry.curation_method),
        curation_type: Set(entry.curation_type),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    mapping_log::ActiveModel {
        mapping_id: Set(mapping_id),
        date: Set(log_entry.date),
        user_id: Set(log_entry.user_id),
        operation_type: Set(log_entry.operation_type),
        alteration: Set(log_entry.alteration),
        gene: Set(log_entry.gene),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    Ok(())
}

async fn find_by_nct_id_in<C>(conn: &C, nct_id: &str) -> Result<Option<Model>, DbErr>
where
    C: ConnectionTrait,
{
    Entity::find()
        .filter(Column::NctId.eq(nct_id))
        .one(conn)
        .await
}

impl Model {
    pub async fn find_by_nct_id(db: &DbConn, nct_id: &str) -> Result<Option<Model>, DbErr> {
        find_by_nct_id_in(db, nct_id).await
    }

    /// Loads the entries, log and creator of this mapping.
    pub async fn document(self, db: &DbConn) -> Result<MappingDocument, DbErr> {
        let user = user::Entity::find_by_id(self.user_id).one(db).await?;

        let alterations = mapping_alteration::Entity::find()
            .filter(mapping_alteration::Column::MappingId.eq(self.id))
            .order_by_asc(mapping_alteration::Column::Id)
            .all(db)
            .await?;

        let log = mapping_log::Entity::find()
            .filter(mapping_log::Column::MappingId.eq(self.id))
            .order_by_asc(mapping_log::Column::Id)
            .all(db)
            .await?;

        Ok(MappingDocument {
            mapping: self,
            user: user.map(UserSummary::from),
            alterations,
            log,
        })
    }

    pub async fn find_document_by_nct_id(
        db: &DbConn,
        nct_id: &str,
    ) -> Result<Option<MappingDocument>, DbErr> {
        match Self::find_by_nct_id(db, nct_id).await? {
            Some(mapping) => Ok(Some(mapping.document(db).await?)),
            None => Ok(None),
        }
    }

    /// Creates the mapping for `nct_id` with its first entry and log entry.
    ///
    /// Runs in one transaction. Returns `None` without writing anything when a
    /// mapping for `nct_id` already exists; the caller appends instead.
    pub async fn create_with_first_alteration(
        db: &DbConn,
        nct_id: &str,
        entry: NewMappingAlteration,
        log_entry: NewLogEntry,
        user_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        let txn = db.begin().await?;
        let now = Utc::now();

        let inserted = Entity::insert(ActiveModel {
            nct_id: Set(nct_id.to_owned()),
            complete_status: Set(CompleteStatus::Initial),
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
        .on_conflict(OnConflict::column(Column::NctId).do_nothing().to_owned())
        .exec_without_returning(&txn)
        .await?;

        if inserted == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        let mapping = find_by_nct_id_in(&txn, nct_id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Mapping {nct_id} vanished after insert")))?;

        insert_entries(&txn, mapping.id, entry, log_entry).await?;
        txn.commit().await?;

        tracing::debug!(nct_id, mapping_id = mapping.id, "Created mapping");
        Ok(Some(mapping))
    }

    /// Appends one entry and one log entry and advances the status.
    ///
    /// Everything happens in one transaction and the status change is a
    /// conditional update (`"1"` becomes `"2"`, anything else is kept), so
    /// concurrent appends to the same mapping cannot lose each other's writes.
    pub async fn append_alteration(
        &self,
        db: &DbConn,
        entry: NewMappingAlteration,
        log_entry: NewLogEntry,
    ) -> Result<Model, DbErr> {
        let txn = db.begin().await?;

        insert_entries(&txn, self.id, entry, log_entry).await?;

        Entity::update_many()
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(Column::Id.eq(self.id))
            .exec(&txn)
            .await?;

        Entity::update_many()
            .col_expr(Column::CompleteStatus, Expr::value(CompleteStatus::InProgress))
            .filter(Column::Id.eq(self.id))
            .filter(Column::CompleteStatus.eq(CompleteStatus::Initial))
            .exec(&txn)
            .await?;

        let updated = Entity::find_by_id(self.id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Mapping {} no longer exists", self.nct_id)))?;

        txn.commit().await?;

        tracing::debug!(
            nct_id = %updated.nct_id,
            status = %updated.complete_status,
            "Appended alteration to mapping"
        );
        Ok(updated)
    }
}
