//! Schema migrations for the qfolders database
//!
//! The set evolves three tables (`folders`, `questions`, `contributions`)
//! with owner-scoped RLS policies on each. Every migration body is
//! re-runnable: tables and indexes are created with IF NOT EXISTS, column
//! additions are preceded by an existence check, and policies are dropped
//! and recreated. The framework's `seaql_migrations` table is the
//! applied-versions ledger, so each migration still runs exactly once per
//! database in the order listed below.

pub use sea_orm_migration::prelude::*;

pub mod rls;

mod m0001_create_folders;
mod m0002_create_questions;
mod m0003_add_star_ratings;
mod m0004_add_pdf_attachments;
mod m0005_create_contributions;
mod m0006_add_timestamps;

use sea_orm_migration::sea_orm::{ConnectionTrait, Statement};

use rls::RlsPolicy;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m0001_create_folders::Migration),
            Box::new(m0002_create_questions::Migration),
            Box::new(m0003_add_star_ratings::Migration),
            Box::new(m0004_add_pdf_attachments::Migration),
            Box::new(m0005_create_contributions::Migration),
            Box::new(m0006_add_timestamps::Migration),
        ]
    }
}

/// Run one raw SQL statement against the migration connection
pub(crate) async fn exec_sql(manager: &SchemaManager<'_>, sql: String) -> Result<(), DbErr> {
    let stmt = Statement::from_string(manager.get_database_backend(), sql);
    manager.get_connection().execute(stmt).await?;
    Ok(())
}

/// Drop-then-create a policy, so re-applying a migration or changing a
/// policy definition in place is always safe
pub(crate) async fn replace_policy(
    manager: &SchemaManager<'_>,
    policy: &RlsPolicy,
) -> Result<(), DbErr> {
    exec_sql(manager, policy.drop_policy_sql()).await?;
    exec_sql(manager, policy.create_policy_sql()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_ordered_and_unique() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();

        assert_eq!(names.len(), 6);
        for pair in names.windows(2) {
            assert!(
                pair[0] < pair[1],
                "migration names must be strictly increasing: {} >= {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn migration_names_follow_the_numbered_scheme() {
        for migration in Migrator::migrations() {
            let name = migration.name().to_string();
            assert!(
                name.starts_with('m') && name.as_bytes()[1].is_ascii_digit(),
                "unexpected migration name: {}",
                name
            );
        }
    }
}
