//! Image directory adapter
//!
//! Images live under the configured directory, either at its root or in one
//! sub-directory per character kind (`<root>/<kind>/<file>`). Paths are
//! returned as served under `/images`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::application::ports::outbound::ImageLibraryPort;

const PUBLIC_PREFIX: &str = "/images";
const EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];

pub struct DirectoryImageLibrary {
    root: PathBuf,
}

impl DirectoryImageLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Image file names directly inside `dir`; a missing directory is empty
    async fn files_in(dir: &Path) -> Result<Vec<String>> {
        let Some(mut entries) = open_dir(dir).await? else {
            return Ok(Vec::new());
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_image(&name) {
                names.push(name);
            }
        }
        Ok(names)
    }

    async fn kinds(&self) -> Result<Vec<String>> {
        let Some(mut entries) = open_dir(&self.root).await? else {
            return Ok(Vec::new());
        };

        let mut kinds = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type().await?.is_dir() && is_plain_name(&name) {
                kinds.push(name);
            }
        }
        Ok(kinds)
    }

    async fn kind_images(&self, kind: &str) -> Result<Vec<String>> {
        let files = Self::files_in(&self.root.join(kind)).await?;
        Ok(files
            .into_iter()
            .map(|file| format!("{PUBLIC_PREFIX}/{kind}/{file}"))
            .collect())
    }
}

#[async_trait]
impl ImageLibraryPort for DirectoryImageLibrary {
    async fn list_images(&self, kind: Option<String>) -> Result<Vec<String>> {
        let mut images = match kind {
            // Kinds are single path segments; anything else cannot exist
            Some(kind) if !is_plain_name(&kind) => Vec::new(),
            Some(kind) => self.kind_images(&kind).await?,
            None => {
                let mut images: Vec<String> = Self::files_in(&self.root)
                    .await?
                    .into_iter()
                    .map(|file| format!("{PUBLIC_PREFIX}/{file}"))
                    .collect();
                for kind in self.kinds().await? {
                    images.extend(self.kind_images(&kind).await?);
                }
                images
            }
        };
        images.sort();
        tracing::debug!(count = images.len(), "Listed images");
        Ok(images)
    }
}

async fn open_dir(dir: &Path) -> Result<Option<tokio::fs::ReadDir>> {
    match tokio::fs::read_dir(dir).await {
        Ok(entries) => Ok(Some(entries)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", dir.display())),
    }
}

fn is_image(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
}

/// Scratch image directory removed on drop
#[cfg(test)]
pub(crate) struct ImageDir(pub(crate) PathBuf);

#[cfg(test)]
impl ImageDir {
    pub(crate) fn with_files(label: &str, files: &[&str]) -> Self {
        let root = std::env::temp_dir().join(format!(
            "castebook-{label}-{}-{}",
            std::process::id(),
            uuid::Uuid::new_v4()
        ));
        std::fs::create_dir_all(&root).unwrap();
        for file in files {
            let path = root.join(file);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, b"img").unwrap();
        }
        Self(root)
    }
}

#[cfg(test)]
impl Drop for ImageDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ImageDir {
        ImageDir::with_files(
            "images",
            &["a.png", "b.JPG", "notes.txt", "Dame/c.png", "Dame/d.webp", "Sire/e.gif"],
        )
    }

    #[tokio::test]
    async fn test_lists_every_image_sorted() {
        let dir = sample();
        let library = DirectoryImageLibrary::new(&dir.0);

        let images = library.list_images(None).await.unwrap();
        assert_eq!(
            images,
            vec![
                "/images/Dame/c.png",
                "/images/Dame/d.webp",
                "/images/Sire/e.gif",
                "/images/a.png",
                "/images/b.JPG",
            ]
        );
    }

    #[tokio::test]
    async fn test_lists_one_kind() {
        let dir = sample();
        let library = DirectoryImageLibrary::new(&dir.0);

        let images = library.list_images(Some("Dame".into())).await.unwrap();
        assert_eq!(images, vec!["/images/Dame/c.png", "/images/Dame/d.webp"]);

        assert!(library.list_images(Some("Moine".into())).await.unwrap().is_empty());
        assert!(library.list_images(Some("..".into())).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_directory_has_no_images() {
        let library = DirectoryImageLibrary::new(std::env::temp_dir().join("castebook-absent"));
        assert!(library.list_images(None).await.unwrap().is_empty());
    }
}
