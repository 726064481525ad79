use std::process::ExitCode;

use clap::Parser;
use jmin::Cli;

/// `0` on a clean run, `1` if any file produced a `Failed` outcome, `2` on a
/// usage error (clap's own default) or a root path that doesn't exist.
fn main() -> ExitCode {
	let cli = Cli::parse();
	jmin::logging::init(cli.log_level());

	if !cli.path.exists() {
		tracing::error!(path = %cli.path.display(), "no such file or directory");
		return ExitCode::from(2);
	}

	match jmin::run(&cli) {
		Ok(0) => ExitCode::SUCCESS,
		Ok(_) => ExitCode::FAILURE,
		Err(err) => {
			tracing::error!(%err, "jmin failed");
			ExitCode::FAILURE
		}
	}
}
