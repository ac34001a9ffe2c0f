//! Application configuration

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::outbound::Action;

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// sqlx SQLite connection URL
    pub database_url: String,

    /// HTTP server port
    pub server_port: u16,

    /// Directory holding the character images
    pub images_dir: PathBuf,

    /// Actions refused by the access gate
    pub denied_actions: Vec<Action>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:castebook.db?mode=rwc".to_string()),

            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,

            images_dir: env::var("IMAGES_DIR")
                .unwrap_or_else(|_| "public/images".to_string())
                .into(),

            denied_actions: parse_actions(&env::var("DENIED_ACTIONS").unwrap_or_default())
                .context("DENIED_ACTIONS must be a comma-separated list of action names")?,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            server_port: 3000,
            images_dir: PathBuf::from("public/images"),
            denied_actions: Vec::new(),
        }
    }
}

fn parse_actions(raw: &str) -> Result<Vec<Action>> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| name.parse::<Action>().map_err(anyhow::Error::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions() {
        let actions = parse_actions(" characterDelete, playerModify ,").unwrap();
        assert_eq!(actions, vec![Action::CharacterDelete, Action::PlayerModify]);
        assert!(parse_actions("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_actions_rejects_unknown_names() {
        assert!(parse_actions("characterDisplay,launchRockets").is_err());
    }
}
