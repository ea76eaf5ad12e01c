//! Rewrites import alias prefixes (`@/lib/...`, `@/types/...`) in source
//! files with an ordered list of regex substitutions.

pub mod config;
mod error;
pub mod rules;
pub mod walk;

pub use config::load_rule_set;
pub use error::{Error, Result};
pub use rules::{Preset, Rule, RuleSet, Scope};
pub use walk::{Mode, Reporter, Summary, rewrite_file, rewrite_tree};
