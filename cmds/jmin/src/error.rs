//! Per-file failures the driver can recover from by moving on to the next
//! candidate. Distinct from `jmin_core::CoreWarning`, which is never fatal.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("{path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("{path}: memory map failed: {source}")]
	Mmap {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}
