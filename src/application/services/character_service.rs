//! Character Service - Application service for character management
//!
//! Creation runs hydrate, completeness check and the creation listeners
//! before the record is inserted. Modification runs the same pipeline on the
//! stored record and refreshes its modification timestamp.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::{rejected, ServiceError};
use crate::application::listeners::CharacterListener;
use crate::application::pipeline::{ensure_complete, hydrate};
use crate::application::ports::outbound::{CharacterRepositoryPort, ClockPort, ImageLibraryPort};
use crate::domain::entities::Character;
use crate::domain::value_objects::{CharacterAttribute, Identifier};

/// Character service trait defining the application use cases
#[async_trait]
pub trait CharacterService: Send + Sync {
    /// Create a character from a payload (null or object)
    async fn create_character(&self, payload: Value) -> Result<Character, ServiceError>;

    async fn get_character(&self, identifier: &Identifier) -> Result<Option<Character>, ServiceError>;

    async fn list_characters(&self) -> Result<Vec<Character>, ServiceError>;

    /// Characters matching one attribute value
    async fn list_characters_by(
        &self,
        attribute: CharacterAttribute,
    ) -> Result<Vec<Character>, ServiceError>;

    /// Apply a partial payload to a stored character
    async fn modify_character(
        &self,
        identifier: &Identifier,
        payload: Value,
    ) -> Result<Character, ServiceError>;

    async fn delete_character(&self, identifier: &Identifier) -> Result<(), ServiceError>;

    /// Up to `number` image paths, optionally for one character kind
    async fn list_images(
        &self,
        number: usize,
        kind: Option<String>,
    ) -> Result<Vec<String>, ServiceError>;
}

/// Default implementation of CharacterService over a repository port
pub struct CharacterServiceImpl {
    repository: Arc<dyn CharacterRepositoryPort>,
    images: Arc<dyn ImageLibraryPort>,
    clock: Arc<dyn ClockPort>,
    listeners: Vec<Arc<dyn CharacterListener>>,
}

impl CharacterServiceImpl {
    pub fn new(
        repository: Arc<dyn CharacterRepositoryPort>,
        images: Arc<dyn ImageLibraryPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            repository,
            images,
            clock,
            listeners: Vec::new(),
        }
    }

    /// Register a listener fired on every creation
    pub fn with_listener(mut self, listener: Arc<dyn CharacterListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    async fn require(&self, identifier: &Identifier) -> Result<Character, ServiceError> {
        self.repository
            .find_by_identifier(identifier)
            .await?
            .ok_or_else(|| ServiceError::NotFound {
                entity: "Character",
                identifier: identifier.clone(),
            })
    }
}

#[async_trait]
impl CharacterService for CharacterServiceImpl {
    #[instrument(skip(self, payload))]
    async fn create_character(&self, payload: Value) -> Result<Character, ServiceError> {
        let now = self.clock.now();
        let mut character = Character::new(Identifier::generate(now), now);

        hydrate(&mut character, &payload).map_err(|e| rejected("character", e))?;
        ensure_complete(&character).map_err(|e| rejected("character", e))?;
        for listener in &self.listeners {
            listener.character_created(&mut character);
        }

        self.repository.create(&character).await?;

        info!(
            identifier = %character.identifier,
            caste = character.caste.as_deref().unwrap_or_default(),
            "Created character"
        );
        Ok(character)
    }

    #[instrument(skip(self))]
    async fn get_character(&self, identifier: &Identifier) -> Result<Option<Character>, ServiceError> {
        debug!(%identifier, "Fetching character");
        Ok(self.repository.find_by_identifier(identifier).await?)
    }

    #[instrument(skip(self))]
    async fn list_characters(&self) -> Result<Vec<Character>, ServiceError> {
        debug!("Listing characters");
        Ok(self.repository.find_all().await?)
    }

    #[instrument(skip(self))]
    async fn list_characters_by(
        &self,
        attribute: CharacterAttribute,
    ) -> Result<Vec<Character>, ServiceError> {
        debug!(%attribute, "Listing characters by attribute");
        Ok(self.repository.find_by_attribute(&attribute).await?)
    }

    #[instrument(skip(self, payload))]
    async fn modify_character(
        &self,
        identifier: &Identifier,
        payload: Value,
    ) -> Result<Character, ServiceError> {
        let mut character = self.require(identifier).await?;

        hydrate(&mut character, &payload).map_err(|e| rejected("character", e))?;
        ensure_complete(&character).map_err(|e| rejected("character", e))?;
        character.touch(self.clock.now());

        self.repository.update(&character).await?;

        info!(%identifier, "Modified character");
        Ok(character)
    }

    #[instrument(skip(self))]
    async fn delete_character(&self, identifier: &Identifier) -> Result<(), ServiceError> {
        let character = self.require(identifier).await?;
        self.repository.remove(&character).await?;

        info!(%identifier, "Deleted character");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_images(
        &self,
        number: usize,
        kind: Option<String>,
    ) -> Result<Vec<String>, ServiceError> {
        debug!(number, kind = kind.as_deref().unwrap_or("*"), "Listing images");
        let mut images = self.images.list_images(kind).await?;
        images.truncate(number);
        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::json;

    use crate::application::listeners::CreationBonusListener;
    use crate::application::pipeline::PipelineError;
    use crate::application::ports::outbound::{MockClockPort, MockImageLibraryPort};
    use crate::infrastructure::persistence::{memory_pool, SqliteCharacterRepository};

    fn clock_at(at: DateTime<Utc>) -> Arc<dyn ClockPort> {
        let mut clock = MockClockPort::new();
        clock.expect_now().return_const(at);
        Arc::new(clock)
    }

    fn service(repository: Arc<dyn CharacterRepositoryPort>, at: DateTime<Utc>) -> CharacterServiceImpl {
        let clock = clock_at(at);
        CharacterServiceImpl::new(repository, Arc::new(MockImageLibraryPort::new()), clock.clone())
            .with_listener(Arc::new(CreationBonusListener::new(clock)))
    }

    async fn repository() -> Arc<dyn CharacterRepositoryPort> {
        let pool = memory_pool().await.unwrap();
        Arc::new(SqliteCharacterRepository::new(pool))
    }

    fn payload(life: i32) -> Value {
        json!({
            "kind": "Dame",
            "name": "Maeglin",
            "caste": "Erudit",
            "knowledge": "Lettres",
            "intelligence": 90,
            "life": life
        })
    }

    // 2022-03-08T12:00:00+01:00
    fn in_window() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 3, 8, 11, 0, 0).unwrap()
    }

    // 2022-03-11T00:00:00+01:00
    fn after_window() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 3, 10, 23, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_create_inside_launch_window() {
        let repository = repository().await;
        let service = service(repository.clone(), in_window());

        let character = service.create_character(payload(5)).await.unwrap();
        assert_eq!(character.intelligence, Some(250));
        assert_eq!(character.life, Some(20));

        let stored = repository
            .find_by_identifier(&character.identifier)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, character);
    }

    #[tokio::test]
    async fn test_create_after_launch_window() {
        let repository = repository().await;
        let service = service(repository.clone(), after_window());

        let character = service.create_character(payload(5)).await.unwrap();
        assert_eq!(character.intelligence, Some(250));
        assert_eq!(character.life, Some(5));
        assert_eq!(character.creation, after_window());
    }

    #[tokio::test]
    async fn test_incomplete_create_stores_nothing() {
        let repository = repository().await;
        let service = service(repository.clone(), after_window());

        let err = service
            .create_character(json!({ "name": "Maeglin" }))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Pipeline(PipelineError::IncompleteEntity { .. })
        ));
        assert!(repository.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_modify_refreshes_modification_only() {
        let repository = repository().await;
        let created = service(repository.clone(), in_window())
            .create_character(payload(5))
            .await
            .unwrap();

        let later = service(repository.clone(), after_window());
        let modified = later
            .modify_character(&created.identifier, json!({ "life": 33, "intelligence": 10 }))
            .await
            .unwrap();

        assert_eq!(modified.identifier, created.identifier);
        assert_eq!(modified.creation, created.creation);
        assert_eq!(modified.modification, after_window());
        // The creation rule does not run on modification
        assert_eq!(modified.intelligence, Some(10));
        assert_eq!(modified.life, Some(33));
    }

    #[tokio::test]
    async fn test_rejected_modify_keeps_stored_record() {
        let repository = repository().await;
        let service = service(repository.clone(), after_window());
        let created = service.create_character(payload(5)).await.unwrap();

        let err = service
            .modify_character(&created.identifier, json!({ "caste": null, "life": 6 }))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Pipeline(PipelineError::IncompleteEntity { .. })
        ));

        let stored = service.get_character(&created.identifier).await.unwrap().unwrap();
        assert_eq!(stored, created);
    }

    #[tokio::test]
    async fn test_delete_then_lookup_is_not_found() {
        let repository = repository().await;
        let service = service(repository.clone(), after_window());
        let created = service.create_character(payload(5)).await.unwrap();

        service.delete_character(&created.identifier).await.unwrap();
        assert!(repository
            .find_by_identifier(&created.identifier)
            .await
            .unwrap()
            .is_none());

        let err = service.delete_character(&created.identifier).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_by_attribute() {
        let repository = repository().await;
        let service = service(repository.clone(), after_window());
        service.create_character(payload(5)).await.unwrap();
        service.create_character(payload(9)).await.unwrap();
        let mut warrior = payload(9);
        warrior["caste"] = json!("Guerrier");
        service.create_character(warrior).await.unwrap();

        let by_life = service
            .list_characters_by(CharacterAttribute::Life(9))
            .await
            .unwrap();
        assert_eq!(by_life.len(), 2);

        let by_caste = service
            .list_characters_by(CharacterAttribute::Caste("Guerrier".into()))
            .await
            .unwrap();
        assert_eq!(by_caste.len(), 1);

        let by_intelligence = service
            .list_characters_by(CharacterAttribute::Intelligence(250))
            .await
            .unwrap();
        assert_eq!(by_intelligence.len(), 3);

        assert_eq!(service.list_characters().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_list_images_keeps_at_most_number() {
        let mut images = MockImageLibraryPort::new();
        images
            .expect_list_images()
            .withf(|kind| kind.as_deref() == Some("Dame"))
            .returning(|_| {
                Ok(vec![
                    "/images/Dame/a.png".to_string(),
                    "/images/Dame/b.png".to_string(),
                    "/images/Dame/c.png".to_string(),
                ])
            });
        let service = CharacterServiceImpl::new(
            repository().await,
            Arc::new(images),
            clock_at(after_window()),
        );

        let two = service.list_images(2, Some("Dame".into())).await.unwrap();
        assert_eq!(two, vec!["/images/Dame/a.png", "/images/Dame/b.png"]);

        let all = service.list_images(10, Some("Dame".into())).await.unwrap();
        assert_eq!(all.len(), 3);
    }
}
