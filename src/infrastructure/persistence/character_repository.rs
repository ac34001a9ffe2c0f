//! Character repository implementation for SQLite

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::application::ports::outbound::CharacterRepositoryPort;
use crate::domain::entities::Character;
use crate::domain::value_objects::{CharacterAttribute, Identifier};

const COLUMNS: &str = "identifier, kind, name, surname, caste, knowledge, \
                       intelligence, life, image, creation, modification";

/// Repository for Character operations
pub struct SqliteCharacterRepository {
    pool: SqlitePool,
}

impl SqliteCharacterRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_character(row: &SqliteRow) -> Result<Character> {
        let identifier: String = row.try_get("identifier")?;
        Ok(Character {
            identifier: Identifier::parse(&identifier)?,
            kind: row.try_get("kind")?,
            name: row.try_get("name")?,
            surname: row.try_get("surname")?,
            caste: row.try_get("caste")?,
            knowledge: row.try_get("knowledge")?,
            intelligence: row.try_get("intelligence")?,
            life: row.try_get("life")?,
            image: row.try_get("image")?,
            creation: row.try_get::<DateTime<Utc>, _>("creation")?,
            modification: row.try_get::<DateTime<Utc>, _>("modification")?,
        })
    }

    async fn fetch(&self, sql: &str, bind: Option<BindValue<'_>>) -> Result<Vec<Character>> {
        let mut query = sqlx::query(sql);
        query = match bind {
            Some(BindValue::Integer(n)) => query.bind(n),
            Some(BindValue::Text(text)) => query.bind(text),
            None => query,
        };
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(Self::row_to_character).collect()
    }
}

enum BindValue<'a> {
    Integer(i32),
    Text(&'a str),
}

#[async_trait]
impl CharacterRepositoryPort for SqliteCharacterRepository {
    async fn create(&self, character: &Character) -> Result<()> {
        let sql = format!(
            "INSERT INTO characters ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        );
        sqlx::query(&sql)
            .bind(character.identifier.as_str())
            .bind(&character.kind)
            .bind(&character.name)
            .bind(&character.surname)
            .bind(&character.caste)
            .bind(&character.knowledge)
            .bind(character.intelligence)
            .bind(character.life)
            .bind(&character.image)
            .bind(character.creation)
            .bind(character.modification)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Created character: {}", character.identifier);
        Ok(())
    }

    async fn update(&self, character: &Character) -> Result<()> {
        sqlx::query(
            "UPDATE characters SET kind = ?, name = ?, surname = ?, caste = ?, knowledge = ?,
                intelligence = ?, life = ?, image = ?, modification = ?
             WHERE identifier = ?",
        )
        .bind(&character.kind)
        .bind(&character.name)
        .bind(&character.surname)
        .bind(&character.caste)
        .bind(&character.knowledge)
        .bind(character.intelligence)
        .bind(character.life)
        .bind(&character.image)
        .bind(character.modification)
        .bind(character.identifier.as_str())
        .execute(&self.pool)
        .await?;

        tracing::debug!("Updated character: {}", character.identifier);
        Ok(())
    }

    async fn remove(&self, character: &Character) -> Result<()> {
        sqlx::query("DELETE FROM characters WHERE identifier = ?")
            .bind(character.identifier.as_str())
            .execute(&self.pool)
            .await?;

        tracing::debug!("Deleted character: {}", character.identifier);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Character>> {
        let sql = format!("SELECT {COLUMNS} FROM characters ORDER BY rowid");
        self.fetch(&sql, None).await
    }

    async fn find_by_identifier(&self, identifier: &Identifier) -> Result<Option<Character>> {
        let sql = format!("SELECT {COLUMNS} FROM characters WHERE identifier = ?");
        let row = sqlx::query(&sql)
            .bind(identifier.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_character).transpose()
    }

    async fn find_by_attribute(&self, attribute: &CharacterAttribute) -> Result<Vec<Character>> {
        let value = match attribute {
            CharacterAttribute::Intelligence(n) | CharacterAttribute::Life(n) => BindValue::Integer(*n),
            CharacterAttribute::Caste(text) | CharacterAttribute::Knowledge(text) => {
                BindValue::Text(text)
            }
        };
        // Attribute names match the column names
        let sql = format!(
            "SELECT {COLUMNS} FROM characters WHERE {} = ? ORDER BY rowid",
            attribute.name()
        );
        self.fetch(&sql, Some(value)).await
    }
}
