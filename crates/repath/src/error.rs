use std::{io, path::PathBuf};

use itertools::Itertools;

use crate::rules::Preset;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("root directory `{}` does not exist or is not a directory", .0.display())]
    RootNotFound(PathBuf),
    #[error("failed to walk `{}`", .path.display())]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("failed to read `{}`", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write `{}`", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("invalid pattern for rule `{rule}`")]
    Pattern {
        rule: String,
        source: regex::Error,
    },
    #[error("failed to read rule file `{}`", .path.display())]
    ConfigRead { path: PathBuf, source: io::Error },
    #[error("invalid rule file `{}`", .path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("rule file `{}` contains a rule with an empty `from` prefix", .path.display())]
    EmptyPrefix { path: PathBuf },
    #[error("unknown preset `{}`, expected one of: {}", .0, Preset::ALL.iter().join(", "))]
    UnknownPreset(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
