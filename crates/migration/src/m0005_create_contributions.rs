use sea_orm_migration::prelude::*;

use crate::rls::{enable_rls_sql, RlsCommand, RlsPolicy};
use crate::{exec_sql, replace_policy};

#[derive(DeriveIden)]
enum Contributions {
    Table,
    Id,
    UserId,
    ContributionDate,
    ContributionCount,
    CreatedAt,
    UpdatedAt,
}

// Runs with invoker rights: auth.uid() inside the function is the caller,
// and the table's own policies still apply. Insert-or-increment is a single
// statement, so two same-day calls can never race into two rows or a lost
// update.
pub(crate) const RECORD_CONTRIBUTION_FN_SQL: &str = r#"
CREATE OR REPLACE FUNCTION public.record_contribution(day date DEFAULT CURRENT_DATE)
RETURNS SETOF public.contributions
LANGUAGE sql
SECURITY INVOKER
AS $$
    INSERT INTO public.contributions (user_id, contribution_date)
    VALUES (auth.uid(), day)
    ON CONFLICT (user_id, contribution_date)
    DO UPDATE SET contribution_count = contributions.contribution_count + 1,
                  updated_at = now()
    RETURNING *;
$$;
"#;

const DROP_RECORD_CONTRIBUTION_FN_SQL: &str =
    "DROP FUNCTION IF EXISTS public.record_contribution(date);";

fn policies() -> Vec<RlsPolicy> {
    vec![
        RlsPolicy::owner("Contributions select own", "contributions", RlsCommand::Select),
        RlsPolicy::owner("Contributions insert own", "contributions", RlsCommand::Insert),
        RlsPolicy::owner("Contributions update own", "contributions", RlsCommand::Update),
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
                    .table(Contributions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contributions::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(ColumnDef::new(Contributions::UserId).uuid().not_null())
                    .col(ColumnDef::new(Contributions::ContributionDate).date().not_null())
                    .col(
                        ColumnDef::new(Contributions::ContributionCount)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Contributions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Contributions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("contributions_user_id_fkey")
                            .from(Contributions::Table, Contributions::UserId)
                            .to((Alias::new("auth"), Alias::new("users")), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per user per day; this is also the conflict target of the
        // insert-or-increment upsert.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("uq_contributions_user_date")
                    .table(Contributions::Table)
                    .col(Contributions::UserId)
                    .col(Contributions::ContributionDate)
                    .to_owned(),
            )
            .await?;

        exec_sql(manager, enable_rls_sql("contributions", Some("public"))).await?;
        for policy in policies() {
            replace_policy(manager, &policy).await?;
        }

        exec_sql(manager, RECORD_CONTRIBUTION_FN_SQL.to_string()).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        exec_sql(manager, DROP_RECORD_CONTRIBUTION_FN_SQL.to_string()).await?;

        for policy in policies() {
            exec_sql(manager, policy.drop_policy_sql()).await?;
        }

        manager
            .drop_table(Table::drop().table(Contributions::Table).if_exists().to_owned())
            .await
    }
}
