//! Walking a source tree and rewriting candidate files in place.

use std::{fs, path::Path};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::{
    error::{Error, Result},
    rules::RuleSet,
};

/// Whether changed files are written back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Write,
    DryRun,
}

/// Totals of a run over a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Files with a recognized suffix.
    pub visited: usize,
    /// Files whose content changed.
    pub modified: usize,
    /// Individual import clauses rewritten.
    pub replacements: usize,
}

/// Receives progress while a tree is rewritten.
pub trait Reporter {
    fn started(&mut self, _root: &Path, _mode: Mode) {}
    fn visited(&mut self, _path: &Path) {}
    fn modified(&mut self, _path: &Path, _replacements: usize) {}
    fn finished(&mut self, _summary: &Summary) {}
}

impl Reporter for () {}

/// Rewrites a single file.
///
/// Returns the number of replacements if the content changed, in which case
/// the file has been written back unless `mode` is [`Mode::DryRun`].
#[instrument(level = "debug", skip(rules))]
pub fn rewrite_file(path: &Path, rules: &RuleSet, mode: Mode) -> Result<Option<usize>> {
    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let Some(rewritten) = rules.rewrite(path, &content) else {
        debug!("unchanged");
        return Ok(None);
    };
    if mode == Mode::Write {
        fs::write(path, &rewritten.content).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    debug!(replacements = rewritten.replacements, "rewritten");
    Ok(Some(rewritten.replacements))
}

/// Rewrites every candidate file under `root`, in file name order.
///
/// The first error aborts the run. Files already rewritten stay rewritten.
#[instrument(skip(rules, reporter))]
pub fn rewrite_tree(
    root: &Path,
    rules: &RuleSet,
    mode: Mode,
    reporter: &mut dyn Reporter,
) -> Result<Summary> {
    if !root.is_dir() {
        return Err(Error::RootNotFound(root.to_path_buf()));
    }
    reporter.started(root, mode);
    let mut summary = Summary::default();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| Error::Walk {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source,
        })?;
        if !entry.file_type().is_file() || !rules.is_candidate(entry.path()) {
            continue;
        }
        summary.visited += 1;
        reporter.visited(entry.path());
        if let Some(replacements) = rewrite_file(entry.path(), rules, mode)? {
            summary.modified += 1;
            summary.replacements += replacements;
            reporter.modified(entry.path(), replacements);
        }
    }
    reporter.finished(&summary);
    Ok(summary)
}
