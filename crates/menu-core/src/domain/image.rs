//! Dish image selection: upload validation, inline encoding and precedence

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

use crate::error::DomainError;

/// Limits applied to uploaded images
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePolicy {
    pub placeholder: String,
    pub max_bytes: usize,
}

/// File received from the admin form
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Browsers submit an empty file part when nothing was chosen
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty() && self.file_name.as_deref().map_or(true, str::is_empty)
    }
}

/// Image picked in the current form, embedded as a `data:` URL
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageSelection {
    inline: Option<String>,
}

impl ImageSelection {
    /// Accept an upload. On error the previous selection is kept.
    pub fn select(&mut self, upload: ImageUpload, policy: &ImagePolicy) -> Result<(), DomainError> {
        let content_type = upload.content_type.trim().to_lowercase();
        if !content_type.starts_with("image/") {
            return Err(DomainError::InvalidImageType(content_type));
        }
        if upload.bytes.len() > policy.max_bytes {
            return Err(DomainError::ImageTooLarge {
                size: upload.bytes.len(),
                limit: policy.max_bytes,
            });
        }

        debug!(
            "Selected image {:?} ({} bytes, {})",
            upload.file_name,
            upload.bytes.len(),
            content_type
        );
        self.inline = Some(format!("data:{};base64,{}", content_type, STANDARD.encode(&upload.bytes)));
        Ok(())
    }

    /// Re-adopt a data URL accepted by an earlier submission of the same form
    pub fn restore(&mut self, data_url: &str, policy: &ImagePolicy) -> Result<(), DomainError> {
        let data_url = data_url.trim();
        let (header, payload) = data_url
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
            .ok_or_else(|| DomainError::InvalidImageType("not a data URL".to_string()))?;
        if !header.starts_with("image/") {
            return Err(DomainError::InvalidImageType(header.to_string()));
        }
        let size = payload.len() / 4 * 3;
        if size > policy.max_bytes {
            return Err(DomainError::ImageTooLarge { size, limit: policy.max_bytes });
        }

        self.inline = Some(data_url.to_string());
        Ok(())
    }

    pub fn inline(&self) -> Option<&str> {
        self.inline.as_deref()
    }
}

/// Inline upload > URL input > existing image > placeholder.
pub fn resolve_image(
    inline: Option<&str>,
    url: Option<&str>,
    existing: Option<&str>,
    placeholder: &str,
) -> String {
    [inline, url, existing]
        .into_iter()
        .flatten()
        .find(|src| !src.trim().is_empty())
        .unwrap_or(placeholder)
        .to_string()
}
