// src/config.rs

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Workbook location relative to the run root.
pub const DEFAULT_WORKBOOK: &str = "seed_hub/Seed_Hub.xlsx";
/// Output directory relative to the run root.
pub const DEFAULT_OUTPUT_DIR: &str = "output/seeds";
/// Role registry relative to the run root; see [`default_registry`].
pub const DEFAULT_REGISTRY: &str = "seed_hub/roles.yaml";

/// Timestamp layout used in output file names and `--timestamp`.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

static NON_SLUG: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern"));

/// Everything one run needs. Nothing is read from the process environment
/// or the clock once this is built.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub role: String,
    pub workbook: PathBuf,
    pub output_dir: PathBuf,
    /// Explicit destination; otherwise derived from role and timestamp.
    pub output_path: Option<PathBuf>,
    pub timestamp: NaiveDateTime,
    pub registry: Option<PathBuf>,
}

impl PipelineConfig {
    /// Defaults laid out under `root`. No registry is set; callers that want
    /// one pass it explicitly or look it up with [`default_registry`].
    pub fn new(root: &Path, role: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            role: role.into(),
            workbook: root.join(DEFAULT_WORKBOOK),
            output_dir: root.join(DEFAULT_OUTPUT_DIR),
            output_path: None,
            timestamp,
            registry: None,
        }
    }

    /// `<output_dir>/<role-slug>_<timestamp>_seed.csv` unless overridden.
    pub fn resolved_output_path(&self) -> PathBuf {
        match &self.output_path {
            Some(p) => p.clone(),
            None => self.output_dir.join(format!(
                "{}_{}_seed.csv",
                role_slug(&self.role),
                self.timestamp.format(TIMESTAMP_FORMAT)
            )),
        }
    }
}

/// `<root>/seed_hub/roles.yaml` if that file exists.
pub fn default_registry(root: &Path) -> Option<PathBuf> {
    let path = root.join(DEFAULT_REGISTRY);
    path.is_file().then_some(path)
}

/// `"AI/ML Infra Engineer "` → `"ai_ml_infra_engineer"`; `"role"` if nothing
/// is left.
pub fn role_slug(role: &str) -> String {
    let lowered = role.trim().to_lowercase();
    let slug = NON_SLUG.replace_all(&lowered, "_");
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        "role".to_string()
    } else {
        slug.to_string()
    }
}

pub fn parse_timestamp(raw: &str) -> chrono::ParseResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
}
