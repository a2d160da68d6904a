//! # Migrate Utility
//!
//! Applies or reverts the schema migrations against `DATABASE_URL`.
//!
//! **WARNING**: `down` drops every table and all data in them.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --package migrate -- up
//! cargo run --package migrate -- down
//! cargo run --package migrate -- up path/to/migrations
//! ```

use lib_core::model::store::{create_pool, run_migrations, DbPool};
use lib_utils::get_env;
use sqlx::migrate::Migrator;
use sqlx::query_as;
use std::io::{self, Write};
use std::path::Path;

const DEFAULT_MIGRATIONS_PATH: &str = "migrations";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut args = std::env::args().skip(1);
    let command = args.next().unwrap_or_default();
    let migrations_path = args.next().unwrap_or_else(|| DEFAULT_MIGRATIONS_PATH.to_string());

    println!("============================================");
    println!("  Migrate Utility");
    println!("============================================");
    println!();

    let database_url = get_env("DATABASE_URL")?;

    match command.as_str() {
        "up" => {
            println!("Connecting to database...");
            let pool = create_pool(&database_url).await?;
            println!("Applying migrations from {}...", migrations_path);
            run_migrations(&pool, Path::new(&migrations_path)).await?;
            println!("Migrations applied.");
        }
        "down" => {
            println!("Connecting to database...");
            let pool = create_pool(&database_url).await?;
            revert_all(&pool, &migrations_path).await?;
        }
        _ => {
            println!("Usage: migrate <up|down> [migrations_path]");
            std::process::exit(2);
        }
    }

    Ok(())
}

async fn revert_all(pool: &DbPool, migrations_path: &str) -> anyhow::Result<()> {
    println!("WARNING: This will drop ALL tables and data!");
    println!("This operation cannot be undone.");
    println!();

    // Counts are informational; the tables may not exist yet.
    let users: Option<(i64,)> = query_as("SELECT COUNT(*) FROM users").fetch_one(pool).await.ok();
    let todos: Option<(i64,)> = query_as("SELECT COUNT(*) FROM todos").fetch_one(pool).await.ok();
    if let (Some((users,)), Some((todos,))) = (users, todos) {
        println!("Found {} user(s) and {} todo(s).", users, todos);
        println!();
    }

    print!("Are you sure you want to revert all migrations? (yes/no): ");
    io::stdout().flush()?;

    let mut confirmation = String::new();
    io::stdin().read_line(&mut confirmation)?;
    let confirmation = confirmation.trim().to_lowercase();

    if confirmation != "yes" && confirmation != "y" {
        println!("Operation cancelled.");
        return Ok(());
    }

    println!();
    println!("Reverting migrations...");

    let migrator = Migrator::new(Path::new(migrations_path)).await?;
    migrator.undo(pool, 0).await?;

    println!("All migrations reverted.");

    Ok(())
}
