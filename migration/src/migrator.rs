use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202610190001_create_users::Migration),
            Box::new(migrations::m202610190002_create_alterations::Migration),
            Box::new(migrations::m202610190003_create_mappings::Migration),
            Box::new(migrations::m202610190004_create_mapping_alterations::Migration),
            Box::new(migrations::m202610190005_create_mapping_logs::Migration),
        ]
    }
}
