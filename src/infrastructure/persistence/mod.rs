//! SQLite persistence adapters
//!
//! This module implements the repository ports over an sqlx SQLite pool.
//! The schema is created on startup if missing.

mod character_repository;
mod player_repository;

pub use character_repository::SqliteCharacterRepository;
pub use player_repository::SqlitePlayerRepository;

use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS characters (
        identifier   TEXT PRIMARY KEY NOT NULL,
        kind         TEXT NOT NULL,
        name         TEXT NOT NULL,
        surname      TEXT,
        caste        TEXT NOT NULL,
        knowledge    TEXT NOT NULL,
        intelligence INTEGER NOT NULL,
        life         INTEGER NOT NULL,
        image        TEXT,
        creation     TEXT NOT NULL,
        modification TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_characters_caste ON characters (caste)",
    "CREATE INDEX IF NOT EXISTS idx_characters_knowledge ON characters (knowledge)",
    r#"
    CREATE TABLE IF NOT EXISTS players (
        identifier    TEXT PRIMARY KEY NOT NULL,
        firstname     TEXT NOT NULL,
        lastname      TEXT NOT NULL,
        email         TEXT NOT NULL,
        mirian        INTEGER NOT NULL,
        creation_date TEXT NOT NULL,
        modification  TEXT NOT NULL
    )
    "#,
];

/// Open a pool on `url` and make sure the schema exists
pub async fn connect(url: &str) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(url)
        .await
        .with_context(|| format!("Failed to connect to {url}"))?;

    initialize_schema(&pool).await?;
    tracing::info!("SQLite pool established on {}", url);
    Ok(pool)
}

pub async fn initialize_schema(pool: &SqlitePool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("Failed to initialize schema")?;
    }
    Ok(())
}

/// Single-connection in-memory pool; the database lives as long as the pool
#[cfg(test)]
pub async fn memory_pool() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    initialize_schema(&pool).await?;
    Ok(pool)
}
