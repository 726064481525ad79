//! Tracing setup, following the corpus's CLI pattern: `-v` raises the level,
//! `RUST_LOG` is consulted when no flag was given, output goes to stderr so
//! a driver invoked from a script can still pipe stdout untouched. This tool
//! has nothing worth exporting to an OpenTelemetry collector, unlike `rtk`'s
//! telemetry module, so that layer is dropped (see DESIGN.md).

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, fmt};

pub fn init(default_level: tracing::Level) {
	let filter = EnvFilter::builder()
		.with_default_directive(default_level.into())
		.from_env_lossy();

	fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(std::io::stderr().is_terminal())
		.init();
}
