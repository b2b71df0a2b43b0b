//! Curation upsert: record that an alteration applies to a clinical trial.
//!
//! A curation event touches two independent records, the alteration catalog
//! entry and the trial mapping. Either may or may not exist yet; the upsert
//! converges both and writes one audit entry per call.

use chrono::Utc;
use db::models::alteration::{normalize, Model as AlterationModel};
use db::models::mapping::{MappingDocument, Model as MappingModel, NewLogEntry, NewMappingAlteration};
use sea_orm::{DatabaseConnection, DbErr};
use serde::Serialize;

use crate::error::ServiceError;

/// `curation_method` recorded for entries created through the API.
pub const CURATION_METHOD_MANUAL: &str = "manually";

/// `operation_type` recorded in the audit log for an append.
pub const OPERATION_ADD: &str = "add";

#[derive(Debug, Clone, PartialEq)]
pub struct CurationRequest {
    pub gene: String,
    pub alteration: String,
    pub nct_id: String,
    pub curation_type: Option<String>,
    pub user_id: i64,
}

/// Which records the upsert had to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurationOutcome {
    /// New alteration, new mapping.
    CreatedBoth,
    /// New alteration, appended to an existing mapping.
    CreatedAlterationAppendedMapping,
    /// Existing alteration, new mapping.
    AppendedAlterationCreatedMapping,
    /// Existing alteration, appended to an existing mapping.
    BothAppended,
}

impl CurationOutcome {
    fn from_flags(alteration_created: bool, mapping_created: bool) -> Self {
        match (alteration_created, mapping_created) {
            (true, true) => Self::CreatedBoth,
            (true, false) => Self::CreatedAlterationAppendedMapping,
            (false, true) => Self::AppendedAlterationCreatedMapping,
            (false, false) => Self::BothAppended,
        }
    }

    /// Single-character code older clients switch on. `e` is reserved for failure.
    pub fn legacy_code(self) -> char {
        match self {
            Self::AppendedAlterationCreatedMapping => 'a',
            Self::BothAppended => 'b',
            Self::CreatedBoth => 'c',
            Self::CreatedAlterationAppendedMapping => 'd',
        }
    }
}

/// Legacy code reported when a curation fails.
pub const LEGACY_FAILURE_CODE: char = 'e';

#[derive(Debug, Clone, Serialize)]
pub struct CurationResult {
    pub outcome: CurationOutcome,
    pub code: char,
    pub mapping: MappingDocument,
}

fn required(field: &str, value: String) -> Result<String, ServiceError> {
    if value.is_empty() {
        return Err(ServiceError::Validation(format!("{field} is required")));
    }
    Ok(value)
}

pub struct CurationService;

impl CurationService {
    /// Runs one curation event.
    ///
    /// The reported outcome reflects what was actually written: if a concurrent
    /// request creates the alteration or mapping first, this call reuses it.
    pub async fn curate(
        db: &DatabaseConnection,
        request: CurationRequest,
    ) -> Result<CurationResult, ServiceError> {
        let gene = required("gene", normalize(&request.gene))?;
        let alteration = required("alteration", normalize(&request.alteration))?;
        let nct_id = required("nct_id", request.nct_id.trim().to_owned())?;
        let curation_type = request
            .curation_type
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty());

        let alteration_created =
            match AlterationModel::find_by_gene_and_alteration(db, &gene, &alteration).await? {
                Some(_) => false,
                None => AlterationModel::create_if_absent(db, &gene, &alteration, request.user_id)
                    .await?
                    .is_some(),
            };

        let entry = NewMappingAlteration {
            alteration: alteration.clone(),
            gene: gene.clone(),
            curation_method: CURATION_METHOD_MANUAL.to_owned(),
            curation_type,
        };
        let log_entry = NewLogEntry {
            date: Utc::now(),
            user_id: request.user_id,
            operation_type: OPERATION_ADD.to_owned(),
            alteration: alteration.clone(),
            gene: gene.clone(),
        };

        let (mapping, mapping_created) = match MappingModel::find_by_nct_id(db, &nct_id).await? {
            Some(existing) => (existing.append_alteration(db, entry, log_entry).await?, false),
            None => {
                match MappingModel::create_with_first_alteration(
                    db,
                    &nct_id,
                    entry.clone(),
                    log_entry.clone(),
                    request.user_id,
                )
                .await?
                {
                    Some(created) => (created, true),
                    None => {
                        let existing = MappingModel::find_by_nct_id(db, &nct_id)
                            .await?
                            .ok_or_else(|| {
                                DbErr::RecordNotFound(format!("Mapping {nct_id} not found"))
                            })?;
                        (existing.append_alteration(db, entry, log_entry).await?, false)
                    }
                }
            }
        };

        let outcome = CurationOutcome::from_flags(alteration_created, mapping_created);
        tracing::info!(
            %gene,
            %alteration,
            %nct_id,
            user = request.user_id,
            ?outcome,
            "Curation recorded"
        );

        Ok(CurationResult {
            outcome,
            code: outcome.legacy_code(),
            mapping: mapping.document(db).await?,
        })
    }
}
