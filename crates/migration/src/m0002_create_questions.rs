use sea_orm_migration::prelude::*;

use crate::rls::{enable_rls_sql, RlsCommand, RlsPolicy};
use crate::{exec_sql, replace_policy};

#[derive(DeriveIden)]
enum Questions {
    Table,
    Id,
    UserId,
    FolderId,
    Title,
    Description,
    Notes,
    Links,
    Code,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Folders {
    Table,
    Id,
}

fn policies() -> Vec<RlsPolicy> {
    vec![
        RlsPolicy::owner("Questions select own", "questions", RlsCommand::Select),
        RlsPolicy::owner("Questions insert own", "questions", RlsCommand::Insert),
        RlsPolicy::owner("Questions update own", "questions", RlsCommand::Update),
        RlsPolicy::owner("Questions delete own", "questions", RlsCommand::Delete),
    ]
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Questions::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(ColumnDef::new(Questions::UserId).uuid().not_null())
                    .col(ColumnDef::new(Questions::FolderId).uuid().not_null())
                    .col(ColumnDef::new(Questions::Title).text().not_null())
                    .col(ColumnDef::new(Questions::Description).text())
                    .col(ColumnDef::new(Questions::Notes).text())
                    // Ordered list of reference URLs, stored as a JSON array
                    .col(ColumnDef::new(Questions::Links).json_binary())
                    .col(ColumnDef::new(Questions::Code).text())
                    .col(
                        ColumnDef::new(Questions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("questions_user_id_fkey")
                            .from(Questions::Table, Questions::UserId)
                            .to((Alias::new("auth"), Alias::new("users")), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("questions_folder_id_fkey")
                            .from(Questions::Table, Questions::FolderId)
                            .to(Folders::Table, Folders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_questions_user_created")
                    .table(Questions::Table)
                    .col(Questions::UserId)
                    .col((Questions::CreatedAt, IndexOrder::Desc))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_questions_folder_created")
                    .table(Questions::Table)
                    .col(Questions::FolderId)
                    .col((Questions::CreatedAt, IndexOrder::Desc))
                    .to_owned(),
            )
            .await?;

        exec_sql(manager, enable_rls_sql("questions", Some("public"))).await?;
        for policy in policies() {
            replace_policy(manager, &policy).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for policy in policies() {
            exec_sql(manager, policy.drop_policy_sql()).await?;
        }

        manager
            .drop_table(Table::drop().table(Questions::Table).if_exists().to_owned())
            .await
    }
}
