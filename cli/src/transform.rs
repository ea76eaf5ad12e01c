use std::{error::Error as _, fmt::Write as _, path::Path};

use repath::{Mode, Reporter, RuleSet, Summary};
use tracing_attributes::instrument;

use crate::CLIOpts;

/// Prints one line per step on stdout.
struct StdoutReporter {
    mode: Mode,
}

impl Reporter for StdoutReporter {
    fn started(&mut self, root: &Path, mode: Mode) {
        let suffix = match mode {
            Mode::Write => "",
            Mode::DryRun => " (dry run)",
        };
        println!("Rewriting import aliases under {}{suffix}", root.display());
    }

    fn visited(&mut self, path: &Path) {
        println!("  visiting {}", path.display());
    }

    fn modified(&mut self, path: &Path, replacements: usize) {
        let verb = match self.mode {
            Mode::Write => "modified",
            Mode::DryRun => "would modify",
        };
        println!("  {verb} {} ({replacements} imports)", path.display());
    }

    fn finished(&mut self, summary: &Summary) {
        println!(
            "Done: {} files visited, {} modified, {} imports rewritten",
            summary.visited, summary.modified, summary.replacements
        );
    }
}

fn rule_set(opts: &CLIOpts) -> repath::Result<RuleSet> {
    let rules = match &opts.rules {
        Some(path) => repath::load_rule_set(path)?,
        None => RuleSet::preset(opts.preset)?,
    };
    Ok(if opts.suffixes.is_empty() {
        rules
    } else {
        rules.with_suffixes(opts.suffixes.clone())
    })
}

#[instrument(skip_all, fields(root = %opts.root.display()))]
pub fn transform(opts: &CLIOpts) -> repath::Result<Summary> {
    let rules = rule_set(opts)?;
    let mode = if opts.dry_run {
        Mode::DryRun
    } else {
        Mode::Write
    };
    tracing::info!(preset = %opts.preset, rules = ?opts.rules, ?mode, "starting");
    repath::rewrite_tree(&opts.root, &rules, mode, &mut StdoutReporter { mode })
}

/// Formats an error with all of its sources, outermost first.
pub fn error_chain(err: &repath::Error) -> String {
    let mut out = format!("error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(out, "\n  caused by: {cause}");
        source = cause.source();
    }
    out
}
