/// File storage service - manages uploaded images on disk
use crate::error::{Result, ServerError};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Image types accepted for upload, with the extension they are stored under
const ALLOWED_IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/apng", "apng"),
    ("image/avif", "avif"),
    ("image/gif", "gif"),
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
];

/// Where an uploaded image lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// Album cover art
    Cover,
    /// Free-standing image upload
    Image,
}

impl ImageKind {
    pub fn subdirectory(&self) -> &'static str {
        match self {
            ImageKind::Cover => "covers",
            ImageKind::Image => "images",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
    max_image_bytes: usize,
}

impl FileStorage {
    pub fn new(base_path: PathBuf, max_image_bytes: usize) -> Self {
        Self {
            base_path,
            max_image_bytes,
        }
    }

    /// Initialize storage directories
    pub async fn initialize(&self) -> Result<()> {
        for kind in &[ImageKind::Cover, ImageKind::Image] {
            fs::create_dir_all(self.directory(*kind)).await?;
        }
        Ok(())
    }

    /// Directory holding images of `kind`
    pub fn directory(&self, kind: ImageKind) -> PathBuf {
        self.base_path.join(kind.subdirectory())
    }

    /// Resolve the content type of an upload, guessing from the file name when absent
    pub fn resolve_content_type(content_type: Option<&str>, file_name: Option<&str>) -> Option<String> {
        content_type.map(str::to_string).or_else(|| {
            file_name
                .and_then(|name| mime_guess::from_path(name).first_raw())
                .map(str::to_string)
        })
    }

    /// Check type and size, returning the stored file extension
    pub fn validate_image(&self, content_type: &str, len: usize) -> Result<&'static str> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or(content_type)
            .trim()
            .to_ascii_lowercase();

        let extension = ALLOWED_IMAGE_TYPES
            .iter()
            .find(|(mime, _)| *mime == essence)
            .map(|(_, ext)| *ext)
            .ok_or_else(|| {
                ServerError::BadRequest(format!("Unsupported image type: {}", content_type))
            })?;

        if len > self.max_image_bytes {
            return Err(ServerError::PayloadTooLarge(format!(
                "Image exceeds {} bytes",
                self.max_image_bytes
            )));
        }

        Ok(extension)
    }

    /// Validate and write an image, returning its generated file name
    pub async fn store_image(
        &self,
        kind: ImageKind,
        content_type: &str,
        data: &[u8],
    ) -> Result<String> {
        let extension = self.validate_image(content_type, data.len())?;
        let filename = format!("{}.{}", uuid::Uuid::new_v4().simple(), extension);
        let path = self.directory(kind).join(&filename);

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&path, data).await?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "Stored image");

        Ok(filename)
    }

    /// Path of a stored image
    pub fn image_path(&self, kind: ImageKind, filename: &str) -> Result<PathBuf> {
        if Path::new(filename).components().count() != 1 {
            return Err(ServerError::Forbidden(
                "Path traversal attempt detected".to_string(),
            ));
        }
        Ok(self.directory(kind).join(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_locate_image() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(temp_dir.path().to_path_buf(), 1024);
        storage.initialize().await.unwrap();

        let filename = storage
            .store_image(ImageKind::Cover, "image/png", b"fake png data")
            .await
            .unwrap();
        assert!(filename.ends_with(".png"));

        let path = storage.image_path(ImageKind::Cover, &filename).unwrap();
        assert!(path.exists());
        assert!(path.starts_with(temp_dir.path().join("covers")));
    }

    #[test]
    fn test_rejects_unsupported_type() {
        let storage = FileStorage::new(PathBuf::from("/tmp"), 1024);
        assert!(matches!(
            storage.validate_image("text/plain", 10),
            Err(ServerError::BadRequest(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_image() {
        let storage = FileStorage::new(PathBuf::from("/tmp"), 1024);
        assert!(matches!(
            storage.validate_image("image/jpeg", 1025),
            Err(ServerError::PayloadTooLarge(_))
        ));
        assert_eq!(storage.validate_image("image/jpeg", 1024).unwrap(), "jpg");
    }

    #[test]
    fn test_content_type_parameters_are_ignored() {
        let storage = FileStorage::new(PathBuf::from("/tmp"), 1024);
        assert_eq!(
            storage.validate_image("Image/WebP; charset=binary", 1).unwrap(),
            "webp"
        );
    }

    #[test]
    fn test_content_type_guessed_from_file_name() {
        assert_eq!(
            FileStorage::resolve_content_type(None, Some("cover.png")).as_deref(),
            Some("image/png")
        );
        assert_eq!(
            FileStorage::resolve_content_type(Some("image/gif"), Some("cover.png")).as_deref(),
            Some("image/gif")
        );
    }

    #[test]
    fn test_image_path_rejects_traversal() {
        let storage = FileStorage::new(PathBuf::from("/tmp"), 1024);
        assert!(storage.image_path(ImageKind::Image, "../secret").is_err());
    }
}
