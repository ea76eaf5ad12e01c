use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use repath::Preset;

/// Repath rewrites import alias prefixes across a TypeScript source tree.
#[derive(Debug, Parser, Clone)]
#[clap(version, author)]
pub struct CLIOpts {
    /// Root directory to scan.
    #[clap(env = "REPATH_ROOT", default_value = "apps")]
    pub root: PathBuf,
    /// Built-in rule set: control, components or base.
    #[clap(long, env = "REPATH_PRESET", default_value_t = Preset::Control)]
    pub preset: Preset,
    /// TOML rule file, used instead of the preset.
    #[clap(long, env = "REPATH_RULES")]
    pub rules: Option<PathBuf>,
    /// File name suffix to rewrite, repeatable. Defaults to `.ts` and `.tsx`.
    #[clap(long = "suffix")]
    pub suffixes: Vec<String>,
    /// Report the files that would change without writing them.
    #[clap(long)]
    pub dry_run: bool,
    /// More logging, repeatable. `RUST_LOG` takes precedence.
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

mod logging;
mod transform;

fn main() -> ExitCode {
    let opts = CLIOpts::parse();
    logging::init(opts.verbose);

    match transform::transform(&opts) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", transform::error_chain(&err));
            ExitCode::FAILURE
        }
    }
}
