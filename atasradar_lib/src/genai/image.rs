use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::AtasRadarError;

/// Image bytes as sent inline to the model: base64 payload plus MIME type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineImage {
    pub data: String,
    pub mime_type: String,
}

impl InlineImage {
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Self {
        Self {
            data: STANDARD.encode(bytes),
            mime_type: mime_type.to_string(),
        }
    }

    /// Reads an image file. The MIME type comes from the file extension.
    pub async fn from_path(path: &Path) -> Result<Self, AtasRadarError> {
        let mime_type = mime_for_path(path).ok_or_else(|| {
            AtasRadarError::InvalidInput(format!(
                "unsupported image type '{}'. Use png, jpg, jpeg, webp, heic or heif",
                path.display()
            ))
        })?;
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::from_bytes(&bytes, mime_type))
    }

    /// Parses a `data:<mime>;base64,<payload>` URL.
    pub fn from_data_url(url: &str) -> Option<Self> {
        let rest = url.strip_prefix("data:")?;
        let (meta, data) = rest.split_once(',')?;
        let mime_type = meta.strip_suffix(";base64")?;
        if mime_type.is_empty() || data.is_empty() {
            return None;
        }
        Some(Self {
            data: data.to_string(),
            mime_type: mime_type.to_string(),
        })
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    pub fn decode(&self) -> Result<Vec<u8>, AtasRadarError> {
        STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| AtasRadarError::InvalidInput(format!("invalid base64 image data: {}", e)))
    }
}

fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

/// File extension for a MIME type, used when saving model output.
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        "image/heic" => "heic",
        "image/heif" => "heif",
        _ => "png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_round_trip() {
        let image = InlineImage::from_bytes(b"\x89PNG", "image/png");
        let url = image.to_data_url();
        assert_eq!(url, "data:image/png;base64,iVBORw==");
        assert_eq!(InlineImage::from_data_url(&url), Some(image.clone()));
        assert_eq!(image.decode().unwrap(), b"\x89PNG");
    }

    #[test]
    fn data_url_requires_base64_marker() {
        assert_eq!(InlineImage::from_data_url("data:image/png,abc"), None);
        assert_eq!(InlineImage::from_data_url("image/png;base64,abc"), None);
        assert_eq!(InlineImage::from_data_url("data:;base64,abc"), None);
    }

    #[test]
    fn mime_from_extension() {
        assert_eq!(mime_for_path(Path::new("a/produto.PNG")), Some("image/png"));
        assert_eq!(mime_for_path(Path::new("foto.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_for_path(Path::new("doc.pdf")), None);
        assert_eq!(mime_for_path(Path::new("sem_extensao")), None);
    }

    #[tokio::test]
    async fn from_path_rejects_unknown_extension_without_reading() {
        let err = InlineImage::from_path(Path::new("/nao/existe.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, AtasRadarError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn from_path_missing_file_is_io_error() {
        let err = InlineImage::from_path(Path::new("/nao/existe.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, AtasRadarError::Io(_)));
    }
}
