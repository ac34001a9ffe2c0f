//! Player repository implementation for SQLite

use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::application::ports::outbound::PlayerRepositoryPort;
use crate::domain::entities::Player;
use crate::domain::value_objects::Identifier;

/// Repository for Player operations
pub struct SqlitePlayerRepository {
    pool: SqlitePool,
}

impl SqlitePlayerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_player(row: &SqliteRow) -> Result<Player> {
        let identifier: String = row.try_get("identifier")?;
        Ok(Player {
            identifier: Identifier::parse(&identifier)?,
            firstname: row.try_get("firstname")?,
            lastname: row.try_get("lastname")?,
            email: row.try_get("email")?,
            mirian: row.try_get("mirian")?,
            creation_date: row.try_get("creation_date")?,
            modification: row.try_get("modification")?,
        })
    }
}

#[async_trait]
impl PlayerRepositoryPort for SqlitePlayerRepository {
    async fn create(&self, player: &Player) -> Result<()> {
        sqlx::query(
            "INSERT INTO players
                (identifier, firstname, lastname, email, mirian, creation_date, modification)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(player.identifier.as_str())
        .bind(&player.firstname)
        .bind(&player.lastname)
        .bind(&player.email)
        .bind(player.mirian)
        .bind(player.creation_date)
        .bind(player.modification)
        .execute(&self.pool)
        .await?;

        tracing::debug!("Created player: {}", player.identifier);
        Ok(())
    }

    async fn update(&self, player: &Player) -> Result<()> {
        sqlx::query(
            "UPDATE players SET firstname = ?, lastname = ?, email = ?, mirian = ?, modification = ?
             WHERE identifier = ?",
        )
        .bind(&player.firstname)
        .bind(&player.lastname)
        .bind(&player.email)
        .bind(player.mirian)
        .bind(player.modification)
        .bind(player.identifier.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove(&self, player: &Player) -> Result<()> {
        sqlx::query("DELETE FROM players WHERE identifier = ?")
            .bind(player.identifier.as_str())
            .execute(&self.pool)
            .await?;

        tracing::debug!("Deleted player: {}", player.identifier);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Player>> {
        let rows = sqlx::query("SELECT * FROM players ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_player).collect()
    }

    async fn find_by_identifier(&self, identifier: &Identifier) -> Result<Option<Player>> {
        let row = sqlx::query("SELECT * FROM players WHERE identifier = ?")
            .bind(identifier.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_player).transpose()
    }
}
