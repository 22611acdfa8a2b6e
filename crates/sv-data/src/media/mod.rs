//! Media reference resolution
//!
//! Story items only carry an opaque [`MediaRef`]; the presentation layer turns
//! it into something it can load.

use async_trait::async_trait;
use sv_core::data::MediaResolver;
use sv_core::MediaRef;

use crate::DataError;

/// Resolves storage keys against a base URL.
///
/// Absolute `http(s)` keys pass through unchanged. Other keys are joined onto
/// the base URL, under the provider's path segment when one is set.
#[derive(Debug, Clone)]
pub struct BaseUrlResolver {
    base_url: String,
}

impl BaseUrlResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn resolve_ref(&self, media: &MediaRef) -> Result<String, DataError> {
        let key = media.key.trim();
        if key.is_empty() {
            return Err(DataError::InvalidMedia("empty media key".to_string()));
        }
        if key.starts_with("http://") || key.starts_with("https://") {
            return Ok(key.to_string());
        }

        let key = key.trim_start_matches('/');
        Ok(match media.provider.as_deref().filter(|p| !p.is_empty()) {
            Some(provider) => format!("{}/{}/{}", self.base_url, provider, key),
            None => format!("{}/{}", self.base_url, key),
        })
    }
}

#[async_trait]
impl MediaResolver for BaseUrlResolver {
    async fn resolve(&self, media: &MediaRef) -> anyhow::Result<String> {
        Ok(self.resolve_ref(media)?)
    }
}
