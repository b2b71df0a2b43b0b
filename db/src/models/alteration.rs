use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{LikeExpr, OnConflict};
use sea_orm::{Condition, IntoActiveModel, QueryFilter, QueryOrder};
use serde::Serialize;

use super::user::{self, UserSummary};

/// A curated genomic event: a gene plus an alteration name.
///
/// Both strings are stored upper-cased. The (gene, alteration) pair is
/// unique.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "alterations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub gene: String,
    pub alteration: String,
    /// Creator of the record.
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// An alteration with its creator resolved, as returned to clients.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AlterationWithUser {
    #[serde(flatten)]
    pub alteration: Model,
    pub user: Option<UserSummary>,
}

impl From<(Model, Option<user::Model>)> for AlterationWithUser {
    fn from((alteration, user): (Model, Option<user::Model>)) -> Self {
        Self {
            alteration,
            user: user.map(UserSummary::from),
        }
    }
}

/// Fields an update may touch. Anything else in a request is never persisted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AlterationPatch {
    pub gene: Option<String>,
    pub alteration: Option<String>,
}

/// Canonical stored form of a gene or alteration name.
pub fn normalize(value: &str) -> String {
    value.trim().to_uppercase()
}

/// `LIKE` pattern matching `phrase` anywhere, with wildcards in the phrase
/// taken literally.
fn contains_pattern(phrase: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(phrase.len() + 2);
    pattern.push('%');
    for ch in phrase.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');

    LikeExpr::new(pattern).escape('\\')
}

fn require(field: &str, value: &str) -> Result<(), DbErr> {
    if value.is_empty() {
        return Err(DbErr::Custom(format!(
            "Alteration validation failed: `{field}` is required"
        )));
    }
    Ok(())
}

impl Model {
    /// Inserts a new alteration owned by `user_id`.
    ///
    /// Fails if either name is blank or the pair already exists.
    pub async fn create(
        db: &DbConn,
        gene: &str,
        alteration: &str,
        user_id: i64,
    ) -> Result<Model, DbErr> {
        let gene = normalize(gene);
        let alteration = normalize(alteration);
        require("gene", &gene)?;
        require("alteration", &alteration)?;

        let now = Utc::now();
        let record = ActiveModel {
            gene: Set(gene),
            alteration: Set(alteration),
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        record.insert(db).await
    }

    /// Inserts the pair unless it already exists.
    ///
    /// Returns `None` when another record already holds the pair, so two
    /// concurrent curations of the same pair never produce two rows.
    pub async fn create_if_absent(
        db: &DbConn,
        gene: &str,
        alteration: &str,
        user_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        let gene = normalize(gene);
        let alteration = normalize(alteration);
        require("gene", &gene)?;
        require("alteration", &alteration)?;

        let now = Utc::now();
        let record = ActiveModel {
            gene: Set(gene.clone()),
            alteration: Set(alteration.clone()),
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = Entity::insert(record)
            .on_conflict(
                OnConflict::columns([Column::Gene, Column::Alteration])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;

        if inserted == 0 {
            return Ok(None);
        }
        Self::find_by_gene_and_alteration(db, &gene, &alteration).await
    }

    /// Exact lookup on the normalized pair.
    pub async fn find_by_gene_and_alteration(
        db: &DbConn,
        gene: &str,
        alteration: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Gene.eq(normalize(gene)))
            .filter(Column::Alteration.eq(normalize(alteration)))
            .one(db)
            .await
    }

    /// Same as [`Model::find_by_gene_and_alteration`] with the creator resolved.
    pub async fn find_with_user(
        db: &DbConn,
        gene: &str,
        alteration: &str,
    ) -> Result<Option<AlterationWithUser>, DbErr> {
        let found = Entity::find()
            .filter(Column::Gene.eq(normalize(gene)))
            .filter(Column::Alteration.eq(normalize(alteration)))
            .find_also_related(user::Entity)
            .one(db)
            .await?;

        Ok(found.map(AlterationWithUser::from))
    }

    /// All alterations, newest first.
    pub async fn list(db: &DbConn) -> Result<Vec<AlterationWithUser>, DbErr> {
        let rows = Entity::find()
            .find_also_related(user::Entity)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await?;

        Ok(rows.into_iter().map(AlterationWithUser::from).collect())
    }

    /// Alterations whose id is in `ids`. Unknown ids are skipped.
    pub async fn find_by_ids(db: &DbConn, ids: &[i64]) -> Result<Vec<AlterationWithUser>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = Entity::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .find_also_related(user::Entity)
            .all(db)
            .await?;

        Ok(rows.into_iter().map(AlterationWithUser::from).collect())
    }

    /// Alterations matching every phrase.
    ///
    /// A phrase matches when it occurs in the gene or in the alteration name,
    /// ignoring case.
    pub async fn search_phrases(db: &DbConn, phrases: &[String]) -> Result<Vec<Model>, DbErr> {
        if phrases.is_empty() {
            return Ok(Vec::new());
        }

        let condition = phrases.iter().fold(Condition::all(), |condition, phrase| {
            let phrase = normalize(phrase);
            condition.add(
                Condition::any()
                    .add(Column::Gene.like(contains_pattern(&phrase)))
                    .add(Column::Alteration.like(contains_pattern(&phrase))),
            )
        });

        Entity::find()
            .filter(condition)
            .order_by_asc(Column::Gene)
            .order_by_asc(Column::Alteration)
            .all(db)
            .await
    }

    /// Applies `patch` and persists the result.
    pub async fn update(self, db: &DbConn, patch: AlterationPatch) -> Result<Model, DbErr> {
        let mut active = self.into_active_model();

        if let Some(gene) = patch.gene {
            let gene = normalize(&gene);
            require("gene", &gene)?;
            active.gene = Set(gene);
        }
        if let Some(alteration) = patch.alteration {
            let alteration = normalize(&alteration);
            require("alteration", &alteration)?;
            active.alteration = Set(alteration);
        }
        active.updated_at = Set(Utc::now());

        active.update(db).await
    }

    /// Removes the record and hands it back.
    pub async fn delete(self, db: &DbConn) -> Result<Model, DbErr> {
        let result = Entity::delete_by_id(self.id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(DbErr::RecordNotFound(format!(
                "Alteration {} no longer exists",
                self.id
            )));
        }
        Ok(self)
    }
}
