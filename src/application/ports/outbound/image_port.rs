//! Character image library port

use anyhow::Result;
use async_trait::async_trait;

/// Source of the character portraits offered to clients
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageLibraryPort: Send + Sync {
    /// Public paths of the available images, sorted, restricted to one kind
    /// when given. An unknown kind has no images.
    async fn list_images(&self, kind: Option<String>) -> Result<Vec<String>>;
}
