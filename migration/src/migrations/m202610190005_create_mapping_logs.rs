use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202610190005_create_mapping_logs"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("mapping_logs"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("mapping_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("date")).timestamp().not_null())
                    .col(ColumnDef::new(Alias::new("user_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("operation_type")).string().not_null())
                    .col(ColumnDef::new(Alias::new("alteration")).string().not_null())
                    .col(ColumnDef::new(Alias::new("gene")).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("mapping_logs"), Alias::new("mapping_id"))
                            .to(Alias::new("mappings"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("mapping_logs")).to_owned())
            .await
    }
}
