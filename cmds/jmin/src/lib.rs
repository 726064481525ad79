//! CLI driver for `jmin_core`: argument parsing, file discovery, I/O, and
//! diagnostics: the "external collaborators" the core itself has no
//! knowledge of. Split into a library so integration tests can drive
//! [`walk::discover`] and [`io::process_file`] directly, the way the
//! teacher workspace's `rtk` crate exposes itself to its own `tests/`.

pub mod cli;
pub mod error;
pub mod io;
pub mod logging;
pub mod walk;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

pub use cli::Cli;

/// Runs the whole CLI over an already-parsed [`Cli`]. Returns the number of
/// per-file failures so the caller (binary `main`, or a test) can decide
/// what to do with it.
pub fn run(cli: &Cli) -> Result<usize> {
	let root = &cli.path;
	let config = cli.core_config();
	let candidates =
		walk::discover(root).with_context(|| format!("failed to walk {}", root.display()))?;

	let mut failures = 0usize;
	for path in &candidates {
		if let Err(err) = run_one(path, &config, cli.quiet) {
			failures += 1;
			error!(path = %path.display(), %err, "failed to minify");
		}
	}

	if failures > 0 {
		warn!(
			failures,
			total = candidates.len(),
			"some files were not minified"
		);
	}

	Ok(failures)
}

fn run_one(path: &Path, config: &jmin_core::Config, quiet: bool) -> Result<(), error::Error> {
	match io::process_file(path, config)? {
		io::WalkOutcome::Minified { old_len, new_len } => {
			if !quiet {
				info!(path = %path.display(), old_len, new_len, "minified");
			}
			Ok(())
		}
		io::WalkOutcome::Skipped { reason } => {
			warn!(path = %path.display(), reason, "skipped");
			Ok(())
		}
	}
}
