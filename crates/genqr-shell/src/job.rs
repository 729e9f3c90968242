//! JSON render jobs read from disk.

use std::path::{Path, PathBuf};

use genqr_engine::{PhotoSource, RenderConfig, presets};
use serde::Deserialize;

use crate::interpret::{PayloadInterpreter, resolve_payload};

#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid job file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown preset '{0}'")]
    UnknownPreset(String),
}

/// A render config plus shell-side inputs resolved before rendering.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderJob {
    pub render: RenderConfig,
    /// Profile photo file for badges.
    #[serde(default)]
    pub photo_path: Option<PathBuf>,
    /// Free-form text to interpret into the payload.
    #[serde(default)]
    pub prompt: Option<String>,
}

impl RenderJob {
    pub fn from_json(raw: &str) -> Result<Self, JobError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, JobError> {
        let raw = std::fs::read_to_string(path).map_err(|source| JobError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Apply a badge preset's colors. Standalone QR jobs are left untouched.
    pub fn apply_preset(&mut self, id: &str) -> Result<(), JobError> {
        let preset = presets::find(id).ok_or_else(|| JobError::UnknownPreset(id.to_string()))?;
        if let RenderConfig::Badge(cfg) = &mut self.render {
            preset.apply(cfg);
        }
        Ok(())
    }

    /// Read the photo file into the badge config.
    ///
    /// A missing file is logged and skipped; the engine renders the
    /// placeholder in that case.
    pub fn attach_photo(&mut self) {
        let (Some(path), RenderConfig::Badge(cfg)) = (&self.photo_path, &mut self.render) else {
            return;
        };
        match std::fs::read(path) {
            Ok(bytes) => cfg.profile_photo = Some(PhotoSource::Bytes(bytes)),
            Err(e) => tracing::warn!(path = %path.display(), "Failed to read photo: {e}"),
        }
    }

    /// Replace the payload with the interpretation of `prompt`, if any.
    pub async fn resolve_prompt<I: PayloadInterpreter>(&mut self, interpreter: &I) {
        let Some(prompt) = self.prompt.as_deref().filter(|p| !p.trim().is_empty()) else {
            return;
        };
        let result = resolve_payload(interpreter, prompt).await;
        tracing::info!(kind = %result.kind, explanation = %result.explanation, "Resolved payload");
        match &mut self.render {
            RenderConfig::Qr(cfg) => cfg.value = result.content,
            RenderConfig::Badge(cfg) => cfg.qr_url = result.content,
        }
    }
}
