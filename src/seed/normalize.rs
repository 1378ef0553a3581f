// src/seed/normalize.rs

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));
static NON_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("token pattern"));
static UNDERSCORE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"_{2,}").expect("underscore pattern"));

/// Canonicalize a raw header cell into a column token.
///
/// `"  Source ID\n(primary) "` becomes `"source_id_primary"`. The result only
/// contains `[a-z0-9_]`, never starts or ends with `_`, and is empty when the
/// cell had nothing usable in it. Normalizing a token again returns it as-is.
pub fn normalize_header(raw: &str) -> String {
    let flat = raw.trim().replace(['\r', '\n'], " ");
    let underscored = WHITESPACE_RUN.replace_all(&flat, "_");
    let stripped = NON_TOKEN.replace_all(&underscored, "");
    let collapsed = UNDERSCORE_RUN.replace_all(&stripped, "_");
    collapsed.trim_matches('_').to_ascii_lowercase()
}
