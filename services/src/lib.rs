pub mod alteration;
pub mod curation;
pub mod error;
