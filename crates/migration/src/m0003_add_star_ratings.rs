use sea_orm_migration::prelude::*;

use crate::exec_sql;

#[derive(DeriveIden)]
enum Questions {
    Table,
    Star1,
    Star2,
    Star3,
    IsCompleted,
}

const FLAG_COLUMNS: [&str; 4] = ["star1", "star2", "star3", "is_completed"];

// Partial indexes covering only the flagged rows
const FLAG_INDEXES: [(&str, &str); 4] = [
    ("idx_questions_star1", "star1"),
    ("idx_questions_star2", "star2"),
    ("idx_questions_star3", "star3"),
    ("idx_questions_completed", "is_completed"),
];

fn flag_column(name: &str) -> Questions {
    match name {
        "star1" => Questions::Star1,
        "star2" => Questions::Star2,
        "star3" => Questions::Star3,
        _ => Questions::IsCompleted,
    }
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for column in FLAG_COLUMNS {
            if !manager.has_column("questions", column).await? {
                manager
                    .alter_table(
                        Table::alter()
                            .table(Questions::Table)
                            .add_column(
                                ColumnDef::new(flag_column(column))
                                    .boolean()
                                    .not_null()
                                    .default(false),
                            )
                            .to_owned(),
                    )
                    .await?;
            }
        }

        for (index, column) in FLAG_INDEXES {
            exec_sql(
                manager,
                format!(
                    "CREATE INDEX IF NOT EXISTS \"{}\" ON \"public\".\"questions\" (\"user_id\") WHERE \"{}\";",
                    index, column
                ),
            )
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (index, _) in FLAG_INDEXES {
            exec_sql(manager, format!("DROP INDEX IF EXISTS \"public\".\"{}\";", index)).await?;
        }

        for column in FLAG_COLUMNS {
            if manager.has_column("questions", column).await? {
                manager
                    .alter_table(
                        Table::alter()
                            .table(Questions::Table)
                            .drop_column(flag_column(column))
                            .to_owned(),
                    )
                    .await?;
            }
        }

        Ok(())
    }
}
