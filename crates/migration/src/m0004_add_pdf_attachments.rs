use sea_orm_migration::prelude::*;

use crate::exec_sql;

#[derive(DeriveIden)]
enum Questions {
    Table,
    PdfFileName,
    PdfFilePath,
    PdfFileSize,
    PdfFileUploadedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if !manager.has_column("questions", "pdf_file_name").await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(Questions::Table)
                        .add_column(ColumnDef::new(Questions::PdfFileName).text())
                        .to_owned(),
                )
                .await?;
        }

        if !manager.has_column("questions", "pdf_file_path").await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(Questions::Table)
                        // Object key in the external storage bucket
                        .add_column(ColumnDef::new(Questions::PdfFilePath).text())
                        .to_owned(),
                )
                .await?;
        }

        if !manager.has_column("questions", "pdf_file_size").await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(Questions::Table)
                        .add_column(ColumnDef::new(Questions::PdfFileSize).integer())
                        .to_owned(),
                )
                .await?;
        }

        if !manager.has_column("questions", "pdf_file_uploaded_at").await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(Questions::Table)
                        .add_column(
                            ColumnDef::new(Questions::PdfFileUploadedAt)
                                .timestamp_with_time_zone()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;
        }

        exec_sql(
            manager,
            "CREATE INDEX IF NOT EXISTS \"idx_questions_pdf_file_path\" ON \"public\".\"questions\" (\"pdf_file_path\");".to_string(),
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        exec_sql(
            manager,
            "DROP INDEX IF EXISTS \"public\".\"idx_questions_pdf_file_path\";".to_string(),
        )
        .await?;

        for (name, column) in [
            ("pdf_file_name", Questions::PdfFileName),
            ("pdf_file_path", Questions::PdfFilePath),
            ("pdf_file_size", Questions::PdfFileSize),
            ("pdf_file_uploaded_at", Questions::PdfFileUploadedAt),
        ] {
            if manager.has_column("questions", name).await? {
                manager
                    .alter_table(
                        Table::alter()
                            .table(Questions::Table)
                            .drop_column(column)
                            .to_owned(),
                    )
                    .await?;
            }
        }

        Ok(())
    }
}
