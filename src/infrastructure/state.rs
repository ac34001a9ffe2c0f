//! Shared application state

use std::sync::Arc;

use anyhow::Result;
use sqlx::SqlitePool;

use crate::application::listeners::{AuditPlayerListener, CreationBonusListener};
use crate::application::ports::outbound::{AuthorizationPort, ClockPort};
use crate::application::services::{CharacterServiceImpl, PlayerServiceImpl};
use crate::infrastructure::authorization::ConfiguredGate;
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::images::DirectoryImageLibrary;
use crate::infrastructure::persistence::{self, SqliteCharacterRepository, SqlitePlayerRepository};

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub gate: Arc<dyn AuthorizationPort>,
    // Application services
    pub character_service: CharacterServiceImpl,
    pub player_service: PlayerServiceImpl,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let pool = persistence::connect(&config.database_url).await?;
        Ok(Self::from_pool(config, pool, Arc::new(SystemClock)))
    }

    /// Wire the services over an open pool and the given clock
    pub fn from_pool(config: AppConfig, pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Self {
        let gate = Arc::new(ConfiguredGate::new(config.denied_actions.iter().copied()));

        let character_service = CharacterServiceImpl::new(
            Arc::new(SqliteCharacterRepository::new(pool.clone())),
            Arc::new(DirectoryImageLibrary::new(config.images_dir.clone())),
            clock.clone(),
        )
        .with_listener(Arc::new(CreationBonusListener::new(clock.clone())));

        let player_service =
            PlayerServiceImpl::new(Arc::new(SqlitePlayerRepository::new(pool)), clock)
                .with_listener(Arc::new(AuditPlayerListener));

        Self {
            config,
            gate,
            character_service,
            player_service,
        }
    }
}
