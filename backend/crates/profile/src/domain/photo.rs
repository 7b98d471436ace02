//! Profile Photo Rules

use std::path::Path;

use auth::domain::value_object::user_id::UserId;

use crate::error::ProfileError;

/// Largest accepted photo (10 MiB)
pub const MAX_PHOTO_BYTES: usize = 10 * 1024 * 1024;

/// Accepted image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoFormat {
    Jpeg,
    Png,
}

impl PhotoFormat {
    /// Parse the declared content type of an upload
    ///
    /// `image/jpg` is not a registered type but browsers send it.
    pub fn from_content_type(content_type: &str) -> Result<Self, ProfileError> {
        match content_type.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Ok(PhotoFormat::Jpeg),
            "image/png" => Ok(PhotoFormat::Png),
            _ => Err(ProfileError::UnsupportedMediaType),
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            PhotoFormat::Jpeg => "image/jpeg",
            PhotoFormat::Png => "image/png",
        }
    }

    fn default_extension(&self) -> &'static str {
        match self {
            PhotoFormat::Jpeg => "jpg",
            PhotoFormat::Png => "png",
        }
    }

    /// Extension for the stored object
    ///
    /// The client's own extension is kept only when it names this format;
    /// everything else gets the format's default.
    pub fn extension_for(&self, file_name: Option<&str>) -> String {
        file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .filter(|ext| self.accepts_extension(ext))
            .unwrap_or_else(|| self.default_extension().to_string())
    }

    fn accepts_extension(&self, ext: &str) -> bool {
        match self {
            PhotoFormat::Jpeg => matches!(ext, "jpg" | "jpeg"),
            PhotoFormat::Png => ext == "png",
        }
    }
}

/// Object key of a profile photo: `users/{id}/profile_{unix_nanos}.{ext}`
pub fn photo_key(user_id: UserId, unix_nanos: i64, extension: &str) -> String {
    format!("users/{user_id}/profile_{unix_nanos}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types() {
        assert_eq!(
            PhotoFormat::from_content_type("image/jpeg").unwrap(),
            PhotoFormat::Jpeg
        );
        assert_eq!(
            PhotoFormat::from_content_type("image/jpg").unwrap(),
            PhotoFormat::Jpeg
        );
        assert_eq!(
            PhotoFormat::from_content_type("IMAGE/PNG").unwrap(),
            PhotoFormat::Png
        );
        for rejected in ["image/gif", "application/pdf", "text/plain", ""] {
            assert!(matches!(
                PhotoFormat::from_content_type(rejected),
                Err(ProfileError::UnsupportedMediaType)
            ));
        }
    }

    #[test]
    fn test_extension_from_file_name() {
        let jpeg = PhotoFormat::Jpeg;
        assert_eq!(jpeg.extension_for(Some("me.JPEG")), "jpeg");
        assert_eq!(jpeg.extension_for(Some("archive.tar.jpg")), "jpg");
        assert_eq!(jpeg.extension_for(Some("noext")), "jpg");
        assert_eq!(jpeg.extension_for(Some("evil.j/p")), "jpg");
        assert_eq!(jpeg.extension_for(None), "jpg");
        assert_eq!(PhotoFormat::Png.extension_for(Some("")), "png");
    }

    #[test]
    fn test_extension_must_match_format() {
        let png = PhotoFormat::Png;
        assert_eq!(png.extension_for(Some("photo.exe")), "png");
        assert_eq!(png.extension_for(Some("photo.jpg")), "png");
        assert_eq!(png.extension_for(Some("photo.PNG")), "png");
        assert_eq!(PhotoFormat::Jpeg.extension_for(Some("shell.php")), "jpg");
        assert_eq!(PhotoFormat::Jpeg.extension_for(Some("cat.png")), "jpg");
    }

    #[test]
    fn test_photo_key() {
        assert_eq!(
            photo_key(UserId::from_raw(7), 1_700_000_000_000_000_000, "png"),
            "users/7/profile_1700000000000000000.png"
        );
    }
}
