//! Database configuration module for `AquaTrack`.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust models.

use crate::config::app::optional_env;
use crate::entities::{Customer, Order, Payment, Session, User};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use std::path::Path;

/// Default database location when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/aquatrack.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns default `SQLite` path.
pub fn get_database_url() -> Result<String> {
    Ok(optional_env("DATABASE_URL")?.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()))
}

// SQLite creates the file on `mode=rwc` but not its directory.
fn ensure_sqlite_directory(database_url: &str) -> Result<()> {
    let Some(rest) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let file = rest.split('?').next().unwrap_or(rest);
    if let Some(parent) = Path::new(file).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url()?;
    tracing::debug!("Connecting to database at {database_url}");
    ensure_sqlite_directory(&database_url)?;

    Database::connect(&database_url).await.map_err(Into::into)
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates all tables that do not exist yet.
///
/// Parents are created before children so foreign keys resolve in order.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, User).await?;
    create_table(db, &schema, Session).await?;
    create_table(db, &schema, Customer).await?;
    create_table(db, &schema, Order).await?;
    create_table(db, &schema, Payment).await?;

    Ok(())
}
