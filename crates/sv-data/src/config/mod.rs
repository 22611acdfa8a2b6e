//! Viewer settings files

use std::path::Path;
use sv_core::PlaybackSettings;
use tracing::debug;

use crate::DataError;

/// Parse settings from JSON text; missing fields take their defaults
pub fn parse_settings(json: &str) -> Result<PlaybackSettings, DataError> {
    let settings: PlaybackSettings = serde_json::from_str(json)?;
    Ok(settings.sanitized())
}

/// Load settings from a JSON file
pub async fn load_settings(path: impl AsRef<Path>) -> Result<PlaybackSettings, DataError> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path).await?;
    let settings = parse_settings(&json)?;
    debug!("Loaded playback settings from {}: {:?}", path.display(), settings);
    Ok(settings)
}
