//! Argument parsing. Mirrors spec's "Surrounding CLI": a single positional
//! path plus the handful of flags that shape the `jmin_core::Config` the
//! core actually runs with.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use jmin_core::{Config, Newlines};
use tracing::warn;

#[derive(Parser)]
#[command(name = "jmin")]
#[command(about = "Minify JSON files in place", long_about = None)]
#[command(version)]
#[command(group(ArgGroup::new("newlines").args(["ndjson", "ndjson_preserve_blanks"])))]
pub struct Cli {
	/// File or directory to minify in place
	pub path: PathBuf,

	/// Round numbers to N decimal places (may be negative)
	#[arg(short = 'p', long, value_name = "N", value_parser = clamp_precision)]
	pub precision: Option<i64>,

	/// Treat each line as one JSON value (newline-delimited JSON)
	#[arg(short = 'n', long)]
	pub ndjson: bool,

	/// Like --ndjson, but keep every blank input line
	#[arg(short = 'N', long)]
	pub ndjson_preserve_blanks: bool,

	/// Suppress the per-file summary line
	#[arg(short = 'q', long)]
	pub quiet: bool,

	/// Increase log verbosity (repeatable)
	#[arg(short = 'v', long, action = clap::ArgAction::Count)]
	pub verbose: u8,
}

impl Cli {
	/// Builds the core's `Config` from the parsed flags. Precision values
	/// that don't fit the core's rounding-position range clamp to
	/// `i64::MAX` (no rounding), with a warning, never a hard error.
	pub fn core_config(&self) -> Config {
		let precision = match self.precision {
			Some(p) => p,
			None => i64::MAX,
		};
		let newlines = if self.ndjson_preserve_blanks {
			Newlines::NdjsonPreserveBlanks
		} else if self.ndjson {
			Newlines::Ndjson
		} else {
			Newlines::Off
		};
		Config { precision, newlines }
	}

	/// `tracing_subscriber::EnvFilter` default directive for `-v`/`-vv`,
	/// falling back to `RUST_LOG` when unset. Starts at `info` so the
	/// per-file summary (suppressed only by `-q`) is visible by default.
	pub fn log_level(&self) -> tracing::Level {
		match self.verbose {
			0 => tracing::Level::INFO,
			1 => tracing::Level::DEBUG,
			_ => tracing::Level::TRACE,
		}
	}
}

/// `-p` accepts any valid `i64`; an out-of-range literal (e.g. more digits
/// than `i64` holds) is reported as a warning and clamped rather than
/// aborting the run, per spec's "clamp to i64::MAX and warn" rule for the
/// external CLI. Infallible, so clap never rejects the argument outright.
fn clamp_precision(raw: &str) -> Result<i64, std::convert::Infallible> {
	Ok(match raw.parse::<i64>() {
		Ok(p) => p,
		Err(_) => {
			warn!(value = raw, "precision out of range, disabling rounding");
			i64::MAX
		}
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ndjson_and_preserve_blanks_flags_pick_the_right_mode() {
		let cli = Cli::parse_from(["jmin", "--ndjson", "x.json"]);
		assert_eq!(cli.core_config().newlines, Newlines::Ndjson);

		let cli = Cli::parse_from(["jmin", "--ndjson-preserve-blanks", "x.json"]);
		assert_eq!(
			cli.core_config().newlines,
			Newlines::NdjsonPreserveBlanks
		);

		let cli = Cli::parse_from(["jmin", "x.json"]);
		assert_eq!(cli.core_config().newlines, Newlines::Off);
	}

	#[test]
	fn missing_precision_means_no_rounding() {
		let cli = Cli::parse_from(["jmin", "x.json"]);
		assert_eq!(cli.core_config().precision, i64::MAX);
	}

	#[test]
	fn out_of_range_precision_clamps_instead_of_failing_to_parse() {
		let cli = Cli::parse_from(["jmin", "-p", "999999999999999999999999", "x.json"]);
		assert_eq!(cli.core_config().precision, i64::MAX);
	}

	#[test]
	fn ndjson_and_preserve_blanks_are_mutually_exclusive() {
		let result = Cli::try_parse_from([
			"jmin",
			"--ndjson",
			"--ndjson-preserve-blanks",
			"x.json",
		]);
		assert!(result.is_err());
	}
}
