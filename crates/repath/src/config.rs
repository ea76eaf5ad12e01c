//! Rule sets loaded from TOML files.
//!
//! ```toml
//! suffixes = [".ts", ".tsx"]
//!
//! [[rules]]
//! from = "@/lib/"
//! to = "@lib/"
//!
//! [[scopes]]
//! marker = "apps/control"
//! [[scopes.rules]]
//! from = "@/components/admin/"
//! to = "@/components/"
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::instrument;

use crate::{
    error::{Error, Result},
    rules::{Rule, RuleSet, Scope},
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleFile {
    suffixes: Option<Vec<String>>,
    #[serde(default)]
    rules: Vec<AliasEntry>,
    #[serde(default)]
    scopes: Vec<ScopeEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AliasEntry {
    from: String,
    to: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScopeEntry {
    marker: Option<String>,
    rules: Vec<AliasEntry>,
}

fn build_rules(path: &Path, entries: Vec<AliasEntry>) -> Result<Vec<Rule>> {
    entries
        .into_iter()
        .map(|entry| {
            if entry.from.is_empty() {
                return Err(Error::EmptyPrefix {
                    path: path.to_path_buf(),
                });
            }
            Rule::alias(&entry.from, &entry.to)
        })
        .collect()
}

/// Parses a rule file already read into memory. `path` is only used in errors.
pub fn parse_rule_set(path: &Path, text: &str) -> Result<RuleSet> {
    let file: RuleFile = toml::from_str(text).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })?;
    let base = build_rules(path, file.rules)?;
    let scopes = file
        .scopes
        .into_iter()
        .map(|scope| Ok(Scope::new(scope.marker, build_rules(path, scope.rules)?)))
        .collect::<Result<Vec<_>>>()?;
    let rules = RuleSet::new(base, scopes);
    Ok(match file.suffixes {
        Some(suffixes) => rules.with_suffixes(suffixes),
        None => rules,
    })
}

#[instrument(level = "debug")]
pub fn load_rule_set(path: &Path) -> Result<RuleSet> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rule_set(path, &text)
}
