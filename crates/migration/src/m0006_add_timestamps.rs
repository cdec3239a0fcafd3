use sea_orm_migration::prelude::*;

use crate::exec_sql;

#[derive(DeriveIden)]
enum Folders {
    Table,
    LastAccessed,
    LastUpdated,
}

#[derive(DeriveIden)]
enum Questions {
    Table,
    LastUpdated,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if !manager.has_column("folders", "last_accessed").await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(Folders::Table)
                        .add_column(ColumnDef::new(Folders::LastAccessed).timestamp_with_time_zone())
                        .to_owned(),
                )
                .await?;
        }

        if !manager.has_column("folders", "last_updated").await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(Folders::Table)
                        .add_column(ColumnDef::new(Folders::LastUpdated).timestamp_with_time_zone())
                        .to_owned(),
                )
                .await?;
        }

        if !manager.has_column("questions", "last_updated").await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(Questions::Table)
                        .add_column(ColumnDef::new(Questions::LastUpdated).timestamp_with_time_zone())
                        .to_owned(),
                )
                .await?;
        }

        // Backfill existing rows from their creation time, then give new
        // rows a default. Re-running matches zero rows.
        exec_sql(
            manager,
            "UPDATE \"public\".\"folders\" SET \"last_accessed\" = \"created_at\" WHERE \"last_accessed\" IS NULL;".to_string(),
        )
        .await?;
        exec_sql(
            manager,
            "UPDATE \"public\".\"folders\" SET \"last_updated\" = \"created_at\" WHERE \"last_updated\" IS NULL;".to_string(),
        )
        .await?;
        exec_sql(
            manager,
            "UPDATE \"public\".\"questions\" SET \"last_updated\" = \"created_at\" WHERE \"last_updated\" IS NULL;".to_string(),
        )
        .await?;

        exec_sql(
            manager,
            "ALTER TABLE \"public\".\"folders\" ALTER COLUMN \"last_accessed\" SET DEFAULT now();".to_string(),
        )
        .await?;
        exec_sql(
            manager,
            "ALTER TABLE \"public\".\"folders\" ALTER COLUMN \"last_updated\" SET DEFAULT now();".to_string(),
        )
        .await?;
        exec_sql(
            manager,
            "ALTER TABLE \"public\".\"questions\" ALTER COLUMN \"last_updated\" SET DEFAULT now();".to_string(),
        )
        .await?;

        // Owner-scoped listing by recency of change
        exec_sql(
            manager,
            "CREATE INDEX IF NOT EXISTS \"idx_folders_user_updated\" ON \"public\".\"folders\" (\"user_id\", \"last_updated\" DESC);".to_string(),
        )
        .await?;
        exec_sql(
            manager,
            "CREATE INDEX IF NOT EXISTS \"idx_questions_user_updated\" ON \"public\".\"questions\" (\"user_id\", \"last_updated\" DESC);".to_string(),
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        exec_sql(
            manager,
            "DROP INDEX IF EXISTS \"public\".\"idx_folders_user_updated\";".to_string(),
        )
        .await?;
        exec_sql(
            manager,
            "DROP INDEX IF EXISTS \"public\".\"idx_questions_user_updated\";".to_string(),
        )
        .await?;

        if manager.has_column("questions", "last_updated").await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(Questions::Table)
                        .drop_column(Questions::LastUpdated)
                        .to_owned(),
                )
                .await?;
        }

        if manager.has_column("folders", "last_updated").await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(Folders::Table)
                        .drop_column(Folders::LastUpdated)
                        .to_owned(),
                )
                .await?;
        }

        if manager.has_column("folders", "last_accessed").await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(Folders::Table)
                        .drop_column(Folders::LastAccessed)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }
}
