// src/roles/registry.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::{debug, warn};

/// An external list of known roles. Consulted before a run, never required.
pub trait RoleRegistry {
    fn contains(&self, role: &str) -> Result<bool>;
}

/// What the registry said about the role, as reported back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryVerdict {
    Skipped,
    Known,
    Unknown,
    Unavailable,
}

/// Ask `registry` about `role` without letting it block the run.
pub fn check_role(registry: Option<&dyn RoleRegistry>, role: &str) -> RegistryVerdict {
    let Some(registry) = registry else {
        debug!("no role registry configured");
        return RegistryVerdict::Skipped;
    };
    match registry.contains(role) {
        Ok(true) => RegistryVerdict::Known,
        Ok(false) => {
            warn!(role, "role is not listed in the role registry; continuing");
            RegistryVerdict::Unknown
        }
        Err(e) => {
            warn!(role, error = %format!("{:#}", e), "role registry unavailable; continuing");
            RegistryVerdict::Unavailable
        }
    }
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    roles: Vec<String>,
}

/// Registry backed by a YAML file of the form `roles: [..]`.
///
/// The file is read on every lookup so a missing file shows up as
/// [`RegistryVerdict::Unavailable`] rather than failing construction.
#[derive(Debug, Clone)]
pub struct YamlRoleRegistry {
    path: PathBuf,
}

impl YamlRoleRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RoleRegistry for YamlRoleRegistry {
    fn contains(&self, role: &str) -> Result<bool> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("reading role registry {:?}", self.path))?;
        let file: RegistryFile = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing role registry {:?}", self.path))?;
        let wanted = role.trim().to_lowercase();
        Ok(file
            .roles
            .iter()
            .any(|r| r.trim().to_lowercase() == wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct Broken;

    impl RoleRegistry for Broken {
        fn contains(&self, _role: &str) -> Result<bool> {
            anyhow::bail!("registry service down")
        }
    }

    #[test]
    fn yaml_registry_matches_case_insensitively() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("roles.yaml");
        fs::write(&path, "roles:\n  - RLHF Engineer\n  - AI Infrastructure Engineer\n").unwrap();

        let registry = YamlRoleRegistry::new(&path);
        assert!(registry.contains("  rlhf engineer ").unwrap());
        assert!(!registry.contains("Barista").unwrap());
        assert_eq!(check_role(Some(&registry), "RLHF Engineer"), RegistryVerdict::Known);
        assert_eq!(check_role(Some(&registry), "Barista"), RegistryVerdict::Unknown);
    }

    #[test]
    fn failures_never_block() {
        let tmp = tempdir().unwrap();
        let missing = YamlRoleRegistry::new(tmp.path().join("nope.yaml"));
        assert_eq!(check_role(Some(&missing), "x"), RegistryVerdict::Unavailable);
        assert_eq!(check_role(Some(&Broken), "x"), RegistryVerdict::Unavailable);
        assert_eq!(check_role(None, "x"), RegistryVerdict::Skipped);
    }

    #[test]
    fn malformed_file_is_unavailable() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("roles.yaml");
        fs::write(&path, "roles: {not: [a list").unwrap();
        assert_eq!(
            check_role(Some(&YamlRoleRegistry::new(&path)), "x"),
            RegistryVerdict::Unavailable
        );
    }
}
