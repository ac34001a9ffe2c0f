//! Player Service - Application service for player management

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::{rejected, ServiceError};
use crate::application::listeners::PlayerListener;
use crate::application::pipeline::{ensure_complete, hydrate};
use crate::application::ports::outbound::{ClockPort, PlayerRepositoryPort};
use crate::domain::entities::Player;
use crate::domain::value_objects::Identifier;

/// Player service trait defining the application use cases
#[async_trait]
pub trait PlayerService: Send + Sync {
    async fn create_player(&self, payload: Value) -> Result<Player, ServiceError>;

    async fn get_player(&self, identifier: &Identifier) -> Result<Option<Player>, ServiceError>;

    async fn list_players(&self) -> Result<Vec<Player>, ServiceError>;

    /// Apply a partial payload to a stored player and notify listeners
    async fn modify_player(
        &self,
        identifier: &Identifier,
        payload: Value,
    ) -> Result<Player, ServiceError>;

    async fn delete_player(&self, identifier: &Identifier) -> Result<(), ServiceError>;
}

/// Default implementation of PlayerService over a repository port
pub struct PlayerServiceImpl {
    repository: Arc<dyn PlayerRepositoryPort>,
    clock: Arc<dyn ClockPort>,
    listeners: Vec<Arc<dyn PlayerListener>>,
}

impl PlayerServiceImpl {
    pub fn new(repository: Arc<dyn PlayerRepositoryPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            repository,
            clock,
            listeners: Vec::new(),
        }
    }

    pub fn with_listener(mut self, listener: Arc<dyn PlayerListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    async fn require(&self, identifier: &Identifier) -> Result<Player, ServiceError> {
        self.repository
            .find_by_identifier(identifier)
            .await?
            .ok_or_else(|| ServiceError::NotFound {
                entity: "Player",
                identifier: identifier.clone(),
            })
    }
}

#[async_trait]
impl PlayerService for PlayerServiceImpl {
    #[instrument(skip(self, payload))]
    async fn create_player(&self, payload: Value) -> Result<Player, ServiceError> {
        let now = self.clock.now();
        let mut player = Player::new(Identifier::generate(now), now);

        hydrate(&mut player, &payload).map_err(|e| rejected("player", e))?;
        ensure_complete(&player).map_err(|e| rejected("player", e))?;

        self.repository.create(&player).await?;

        info!(identifier = %player.identifier, "Created player");
        Ok(player)
    }

    #[instrument(skip(self))]
    async fn get_player(&self, identifier: &Identifier) -> Result<Option<Player>, ServiceError> {
        debug!(%identifier, "Fetching player");
        Ok(self.repository.find_by_identifier(identifier).await?)
    }

    #[instrument(skip(self))]
    async fn list_players(&self) -> Result<Vec<Player>, ServiceError> {
        debug!("Listing players");
        Ok(self.repository.find_all().await?)
    }

    #[instrument(skip(self, payload))]
    async fn modify_player(
        &self,
        identifier: &Identifier,
        payload: Value,
    ) -> Result<Player, ServiceError> {
        let mut player = self.require(identifier).await?;

        hydrate(&mut player, &payload).map_err(|e| rejected("player", e))?;
        ensure_complete(&player).map_err(|e| rejected("player", e))?;
        player.touch(self.clock.now());

        self.repository.update(&player).await?;
        for listener in &self.listeners {
            listener.player_modified(&player);
        }

        info!(%identifier, "Modified player");
        Ok(player)
    }

    #[instrument(skip(self))]
    async fn delete_player(&self, identifier: &Identifier) -> Result<(), ServiceError> {
        let player = self.require(identifier).await?;
        self.repository.remove(&player).await?;

        info!(%identifier, "Deleted player");
        Ok(())
    }
}
