use sea_orm_migration::prelude::*;

use crate::rls::{enable_rls_sql, RlsCommand, RlsPolicy};
use crate::{exec_sql, replace_policy};

#[derive(DeriveIden)]
enum Folders {
    Table,
    Id,
    UserId,
    Name,
    CreatedAt,
}

fn policies() -> Vec<RlsPolicy> {
    vec![
        RlsPolicy::owner("Folders select own", "folders", RlsCommand::Select),
        RlsPolicy::owner("Folders insert own", "folders", RlsCommand::Insert),
        RlsPolicy::owner("Folders update own", "folders", RlsCommand::Update),
        RlsPolicy::owner("Folders delete own", "folders", RlsCommand::Delete),
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
                    .table(Folders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Folders::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(ColumnDef::new(Folders::UserId).uuid().not_null())
                    .col(ColumnDef::new(Folders::Name).text().not_null())
                    .col(
                        ColumnDef::new(Folders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("folders_user_id_fkey")
                            .from(Folders::Table, Folders::UserId)
                            .to((Alias::new("auth"), Alias::new("users")), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Owner-scoped listing, newest first
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_folders_user_created")
                    .table(Folders::Table)
                    .col(Folders::UserId)
                    .col((Folders::CreatedAt, IndexOrder::Desc))
                    .to_owned(),
            )
            .await?;

        exec_sql(manager, enable_rls_sql("folders", Some("public"))).await?;
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
            .drop_table(Table::drop().table(Folders::Table).if_exists().to_owned())
            .await
    }
}
