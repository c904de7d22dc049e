//! Filoperationer för foton

use std::fs;
use std::path::Path;

use crate::models::Photo;
use crate::utils::error::AppResult;

/// Läs in ett foto helt i minnet
pub fn read_photo(path: &Path) -> AppResult<Photo> {
    let bytes = fs::read(path)?;
    let photo = Photo::from_bytes(bytes);
    tracing::info!(
        "Läste foto {:?} ({}, {} bytes)",
        path,
        photo.mime_type(),
        photo.bytes().len()
    );
    Ok(photo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::AppError;

    #[test]
    fn test_read_photo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dog.gif");
        fs::write(&path, b"GIF89a\x01\x00\x01\x00\x00\x00\x00;").unwrap();

        let photo = read_photo(&path).unwrap();
        assert_eq!(photo.mime_type(), "image/gif");
        assert!(photo.data_uri().starts_with("data:image/gif;base64,"));
    }

    #[test]
    fn test_read_missing_photo() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_photo(&dir.path().join("saknas.png")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
