// src/roles/mod.rs

pub mod registry;

pub use registry::{RegistryVerdict, RoleRegistry, YamlRoleRegistry};

use serde::Serialize;

/// A substring-triggered label rule.
#[derive(Debug, Clone, Copy)]
pub struct LabelRule {
    pub triggers: &'static [&'static str],
    pub labels: &'static [&'static str],
}

impl LabelRule {
    fn fires(&self, role: &str) -> bool {
        self.triggers.iter().any(|t| role.contains(t))
    }
}

/// Evaluated top to bottom; every rule that fires contributes its labels.
pub static LABEL_RULES: &[LabelRule] = &[
    LabelRule {
        triggers: &["rlhf", "alignment", "safety", "eval", "benchmark"],
        labels: &["Alignment & Evals"],
    },
    LabelRule {
        triggers: &["infra", "platform", "gpu", "distributed"],
        labels: &["AI Infrastructure"],
    },
    LabelRule {
        triggers: &["applied", "product", "llm", "agent"],
        labels: &["Applied AI"],
    },
];

pub const DEFAULT_LABEL: &str = "General AI";

/// Checked after the table; prepends [`FRONTIER_LABEL`].
pub static FRONTIER_RULE: LabelRule = LabelRule {
    triggers: &["frontier", "research", "scientist"],
    labels: &[FRONTIER_LABEL],
};

pub const FRONTIER_LABEL: &str = "Frontier Research";

/// Ordered, duplicate-free labels a role is allowed to pull rows from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RoleLabels(Vec<String>);

impl RoleLabels {
    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l == label)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, label: &str) {
        if !self.contains(label) {
            self.0.push(label.to_string());
        }
    }
}

/// Resolve `role` against [`LABEL_RULES`].
///
/// Never empty: a role no rule recognises gets [`DEFAULT_LABEL`].
pub fn resolve_labels(role: &str) -> RoleLabels {
    let role = role.trim().to_lowercase();
    let mut labels = RoleLabels(Vec::new());

    for rule in LABEL_RULES.iter().filter(|r| r.fires(&role)) {
        for label in rule.labels {
            labels.push(label);
        }
    }
    if labels.is_empty() {
        labels.push(DEFAULT_LABEL);
    }

    if FRONTIER_RULE.fires(&role) {
        for label in FRONTIER_RULE.labels.iter().rev() {
            if !labels.contains(label) {
                labels.0.insert(0, label.to_string());
            }
        }
    }

    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_roles() {
        let labels = resolve_labels("RLHF Engineer");
        assert!(labels.contains("Alignment & Evals"));
        assert_eq!(labels.as_slice(), ["Alignment & Evals"]);

        assert!(resolve_labels("  Model EVALUATION lead ").contains("Alignment & Evals"));
    }

    #[test]
    fn infrastructure_roles() {
        let labels = resolve_labels("AI Infrastructure Engineer");
        assert!(labels.contains("AI Infrastructure"));
        assert!(!labels.contains(DEFAULT_LABEL));
        assert!(resolve_labels("GPU kernel hacker").contains("AI Infrastructure"));
    }

    #[test]
    fn unrecognised_role_gets_only_the_default() {
        assert_eq!(resolve_labels("Barista").as_slice(), [DEFAULT_LABEL]);
        assert_eq!(resolve_labels("").as_slice(), [DEFAULT_LABEL]);
    }

    #[test]
    fn rule_order_is_table_order() {
        let labels = resolve_labels("Distributed safety platform engineer");
        assert_eq!(labels.as_slice(), ["Alignment & Evals", "AI Infrastructure"]);

        let labels = resolve_labels("LLM eval infra");
        assert_eq!(
            labels.as_slice(),
            ["Alignment & Evals", "AI Infrastructure", "Applied AI"]
        );
    }

    #[test]
    fn frontier_trigger_prepends() {
        let labels = resolve_labels("Research Scientist, Alignment");
        assert_eq!(labels.as_slice(), [FRONTIER_LABEL, "Alignment & Evals"]);

        let labels = resolve_labels("Research Scientist");
        assert_eq!(labels.as_slice(), [FRONTIER_LABEL, DEFAULT_LABEL]);
    }

    #[test]
    fn repeated_triggers_do_not_duplicate() {
        let labels = resolve_labels("safety eval benchmark alignment");
        assert_eq!(labels.len(), 1);
    }
}
