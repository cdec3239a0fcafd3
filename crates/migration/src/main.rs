use std::{env, fs, path::PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use sea_orm_migration::prelude::*;

use qfolders_migration::Migrator;

#[derive(Parser, Debug)]
#[command(name = "qfolders-migration", version)]
#[command(about = "Schema migration tool for the qfolders database", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Optional database URL. If not provided, tries to read from the
    /// DATABASE_URL environment variable.
    #[arg(long)]
    database_url: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply pending migrations
    Up {
        /// Apply a specific number of migrations
        #[arg(long)]
        num: Option<u32>,
    },
    /// Rollback applied migrations
    Down {
        /// Rollback a specific number of migrations. Use "all" to roll back all.
        #[arg(long, default_value = "1")]
        num: String,
    },
    /// Show applied vs pending migrations
    Status,
    /// Apply all pending migrations
    Fresh,
    /// Rollback all applied migrations, then apply all
    Refresh,
    /// Drop all tables, then reapply all migrations
    Reset,
    /// Create a new migration source file
    New {
        /// Descriptive name for the migration (e.g., add_archived_flag)
        name: String,
    },
}

async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Creating a migration file needs no database connection
    if let Commands::New { name } = cli.command {
        return create_new_migration(&name);
    }

    let db_url = cli
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .ok_or_else(|| {
            anyhow::anyhow!("Database URL not provided via --database-url or DATABASE_URL env var")
        })?;

    println!("Connecting to database...");
    let conn = sea_orm::Database::connect(&db_url)
        .await
        .with_context(|| "Failed to connect to database".to_string())?;
    println!("Connected.");

    match cli.command {
        Commands::Up { num } => {
            println!("Applying migrations...");
            Migrator::up(&conn, num).await?;
        }
        Commands::Down { num } => {
            println!("Rolling back migrations...");
            let steps = match num.as_str() {
                "all" => None,
                s => Some(
                    s.parse::<u32>()
                        .map_err(|_| anyhow::anyhow!("Invalid number for down command: {}", s))?,
                ),
            };
            Migrator::down(&conn, steps).await?;
        }
        Commands::Status => {
            Migrator::status(&conn).await?;
        }
        Commands::Fresh => {
            println!("Applying fresh migrations (apply all pending)...");
            Migrator::fresh(&conn).await?;
        }
        Commands::Refresh => {
            println!("Refreshing migrations (rollback all, then apply all)...");
            Migrator::refresh(&conn).await?;
        }
        Commands::Reset => {
            println!("Resetting database (drop all, then apply all)...");
            Migrator::reset(&conn).await?;
        }
        Commands::New { .. } => unreachable!(),
    }

    println!("Operation completed successfully.");
    Ok(())
}

/// Next free number in the m0001, m0002, ... sequence under src/
fn next_migration_number(migration_dir: &PathBuf) -> u32 {
    let mut highest = 0;
    if let Ok(entries) = fs::read_dir(migration_dir) {
        for entry in entries.flatten() {
            let file_name = entry.file_name().to_string_lossy().to_string();
            if let Some(rest) = file_name.strip_prefix('m') {
                if let Some(number) = rest.get(..4).and_then(|s| s.parse::<u32>().ok()) {
                    highest = highest.max(number);
                }
            }
        }
    }
    highest + 1
}

fn create_new_migration(name: &str) -> anyhow::Result<()> {
    let migration_dir = PathBuf::from("src");
    if !migration_dir.exists() {
        fs::create_dir_all(&migration_dir)
            .with_context(|| format!("Failed to create directory: {:?}", migration_dir))?;
    }

    let module_name = format!("m{:04}_{}", next_migration_number(&migration_dir), name);
    let file_path = migration_dir.join(format!("{}.rs", module_name));

    let boilerplate = r#"use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Guard every column addition with manager.has_column, create tables
        // and indexes with if_not_exists, and drop-then-create policies.
        todo!()
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        todo!()
    }
}
"#;

    println!("Creating migration file: {:?}", file_path);
    fs::write(&file_path, boilerplate)
        .with_context(|| format!("Failed to write migration file: {:?}", file_path))?;

    println!("\nMigration file created successfully!");
    println!("Next steps:");
    println!("1. Implement the `up` and `down` methods in {:?}.", file_path);
    println!("2. Declare the module and register it in `Migrator::migrations()` in src/lib.rs:");
    println!("   mod {};", module_name);
    println!("   Box::new({}::Migration),", module_name);

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {:#?}", err);
        std::process::exit(1);
    }
}
