//! Output file naming and saving.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use genqr_engine::RenderConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Qr,
    Badge,
}

impl OutputKind {
    fn prefix(self) -> &'static str {
        match self {
            OutputKind::Qr => "genqr",
            OutputKind::Badge => "id-badge",
        }
    }
}

impl From<&RenderConfig> for OutputKind {
    fn from(config: &RenderConfig) -> Self {
        match config {
            RenderConfig::Qr(_) => OutputKind::Qr,
            RenderConfig::Badge(_) => OutputKind::Badge,
        }
    }
}

/// `genqr-<millis>.png` or `id-badge-<millis>.png`.
pub fn output_file_name(kind: OutputKind, now: DateTime<Utc>) -> String {
    format!("{}-{}.png", kind.prefix(), now.timestamp_millis())
}

/// Write `png` into `dir`, creating it if needed. Returns the written path.
pub fn save_png(dir: &Path, name: &str, png: &[u8]) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(name);
    std::fs::write(&path, png)?;
    Ok(path)
}
