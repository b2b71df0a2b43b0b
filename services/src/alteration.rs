//! Alteration lookups that need request-level parsing before they hit the store.

use db::models::alteration::{AlterationWithUser, Model as AlterationModel};
use sea_orm::DatabaseConnection;

use crate::error::ServiceError;

/// Parses a comma-separated list of alteration ids.
///
/// Surrounding whitespace and empty items are ignored; any other token that is
/// not an integer id rejects the whole list.
pub fn parse_id_list(raw: &str) -> Result<Vec<i64>, ServiceError> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| ServiceError::Validation(format!("Invalid alteration id: {token}")))
        })
        .collect()
}

/// Builds the text-search string for a comma-separated keyword list.
///
/// Every keyword becomes a quoted phrase and the phrases are concatenated
/// without separators: `braf, v600e` gives `"braf""v600e"`.
pub fn build_text_query(keywords: &str) -> String {
    keywords
        .split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(|keyword| format!("\"{keyword}\""))
        .collect()
}

/// Splits a text-search string into the phrases a record must contain.
///
/// Quoted segments are phrases; unquoted text contributes one term per word.
pub fn parse_text_query(query: &str) -> Vec<String> {
    fn flush(buf: &mut String, terms: &mut Vec<String>) {
        let trimmed = buf.trim();
        if !trimmed.is_empty() {
            terms.push(trimmed.to_owned());
        }
        buf.clear();
    }

    let mut terms = Vec::new();
    let mut current = String::new();
    let mut in_phrase = false;

    for ch in query.chars() {
        match ch {
            '"' => {
                flush(&mut current, &mut terms);
                in_phrase = !in_phrase;
            }
            c if c.is_whitespace() && !in_phrase => flush(&mut current, &mut terms),
            c => current.push(c),
        }
    }
    flush(&mut current, &mut terms);

    terms
}

pub struct AlterationService;

impl AlterationService {
    /// Bulk lookup for `GET /alterations/trials/{ids}`.
    pub async fn find_by_id_list(
        db: &DatabaseConnection,
        raw: &str,
    ) -> Result<Vec<AlterationWithUser>, ServiceError> {
        let ids = parse_id_list(raw)?;
        tracing::debug!(?ids, "Resolved alteration id list");

        Ok(AlterationModel::find_by_ids(db, &ids).await?)
    }

    /// Full-text style search over gene and alteration names.
    pub async fn search(
        db: &DatabaseConnection,
        keywords: &str,
    ) -> Result<Vec<AlterationModel>, ServiceError> {
        let query = build_text_query(keywords);
        let phrases = parse_text_query(&query);
        tracing::debug!(%query, ?phrases, "Searching alterations");

        Ok(AlterationModel::search_phrases(db, &phrases).await?)
    }
}
