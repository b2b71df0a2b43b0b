//! Request bodies for the `/alterations` route group.

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAlterationRequest {
    #[validate(length(min = 1, message = "gene is required"))]
    pub gene: String,
    #[validate(length(min = 1, message = "alteration is required"))]
    pub alteration: String,
}

/// Only `gene` and `alteration` are editable; other fields are ignored.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateAlterationRequest {
    #[validate(length(min = 1, message = "gene must not be empty"))]
    pub gene: Option<String>,
    #[validate(length(min = 1, message = "alteration must not be empty"))]
    pub alteration: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CurationBody {
    #[serde(rename = "type", default)]
    pub curation_type: Option<String>,
}
