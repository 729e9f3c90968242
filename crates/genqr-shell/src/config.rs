//! Shell configuration loaded from `.env` + environment.

use std::path::PathBuf;

const DEFAULT_JOB_PATH: &str = "genqr.json";
const DEFAULT_OUTPUT_DIR: &str = "output";

/// Runtime configuration for one shell invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// JSON render job to execute.
    pub job_path: PathBuf,
    pub output_dir: PathBuf,
    /// Badge preset id applied before rendering.
    pub preset: Option<String>,
    pub font_bold: Option<PathBuf>,
    pub font_regular: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            job_path: PathBuf::from(DEFAULT_JOB_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            preset: None,
            font_bold: None,
            font_regular: None,
        }
    }
}

impl ShellConfig {
    /// Load `.env` (if present) and read `GENQR_*` variables.
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Failed to read .env file: {e}");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            job_path: get("GENQR_JOB").map(PathBuf::from).unwrap_or(defaults.job_path),
            output_dir: get("GENQR_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            preset: get("GENQR_PRESET"),
            font_bold: get("GENQR_FONT_BOLD").map(PathBuf::from),
            font_regular: get("GENQR_FONT_REGULAR").map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let cfg = ShellConfig::from_lookup(|_| None);
        assert_eq!(cfg, ShellConfig::default());
    }

    #[test]
    fn test_reads_all_keys() {
        let vars: HashMap<&str, &str> = [
            ("GENQR_JOB", "jobs/badge.json"),
            ("GENQR_OUTPUT_DIR", "/tmp/out"),
            ("GENQR_PRESET", "forest-green"),
            ("GENQR_FONT_BOLD", "b.ttf"),
            ("GENQR_FONT_REGULAR", "r.ttf"),
        ]
        .into_iter()
        .collect();
        let cfg = ShellConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.job_path, PathBuf::from("jobs/badge.json"));
        assert_eq!(cfg.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(cfg.preset.as_deref(), Some("forest-green"));
        assert_eq!(cfg.font_bold, Some(PathBuf::from("b.ttf")));
        assert_eq!(cfg.font_regular, Some(PathBuf::from("r.ttf")));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let cfg = ShellConfig::from_lookup(|k| (k == "GENQR_PRESET").then(|| "  ".to_string()));
        assert!(cfg.preset.is_none());
    }
}
