pub mod m202610190001_create_users;
pub mod m202610190002_create_alterations;
pub mod m202610190003_create_mappings;
pub mod m202610190004_create_mapping_alterations;
pub mod m202610190005_create_mapping_logs;
