//! Opens a candidate path, hands its bytes to the core, and persists the
//! prefix it declares valid. Files at or above [`MMAP_THRESHOLD`] are mapped
//! in place; smaller files go through a plain `Vec<u8>`, since mapping has
//! fixed overhead that isn't worth paying for a few bytes.

use std::fs::{File, OpenOptions};
use std::path::Path;

use jmin_core::{minify, Config};
use memmap2::MmapMut;
use tracing::debug;

use crate::error::Error;

const MMAP_THRESHOLD: u64 = 64 * 1024;

/// Outcome of processing one candidate path.
pub enum WalkOutcome {
	Minified { old_len: u64, new_len: usize },
	Skipped { reason: &'static str },
}

pub fn process_file(path: &Path, config: &Config) -> Result<WalkOutcome, Error> {
	let file = OpenOptions::new()
		.read(true)
		.write(true)
		.open(path)
		.map_err(|source| Error::Io {
			path: path.to_path_buf(),
			source,
		})?;

	let len = file
		.metadata()
		.map_err(|source| Error::Io {
			path: path.to_path_buf(),
			source,
		})?
		.len();

	if len == 0 {
		return Ok(WalkOutcome::Minified {
			old_len: 0,
			new_len: 0,
		});
	}

	if has_likely_utf16_bom(&file, path)? {
		return Ok(WalkOutcome::Skipped {
			reason: "looks like UTF-16/UTF-32 text, not UTF-8",
		});
	}

	let new_len = if len >= MMAP_THRESHOLD {
		minify_mapped(&file, path, len, config)?
	} else {
		minify_buffered(&file, path, config)?
	};

	file.set_len(new_len as u64).map_err(|source| Error::Io {
		path: path.to_path_buf(),
		source,
	})?;

	Ok(WalkOutcome::Minified {
		old_len: len,
		new_len,
	})
}

/// Either of the first two bytes being `0x00` is the signature of a
/// UTF-16/UTF-32-encoded file; this tool only understands UTF-8.
///
/// Reads directly through `&File` rather than a `BufReader` (which would
/// pull a whole internal-buffer's worth of bytes from the shared file
/// position on the first `read`) and seeks back to the start afterwards, so
/// the later full-file read in [`minify_buffered`] isn't missing its
/// opening bytes.
fn has_likely_utf16_bom(file: &File, path: &Path) -> Result<bool, Error> {
	use std::io::{Read, Seek, SeekFrom};

	let mut prefix = [0u8; 2];
	let mut handle = file;
	let read = handle.read(&mut prefix).map_err(|source| Error::Io {
		path: path.to_path_buf(),
		source,
	})?;
	handle.seek(SeekFrom::Start(0)).map_err(|source| Error::Io {
		path: path.to_path_buf(),
		source,
	})?;
	Ok(prefix[..read].iter().any(|&b| b == 0))
}

fn minify_mapped(file: &File, path: &Path, len: u64, config: &Config) -> Result<usize, Error> {
	let mut mmap = unsafe { MmapMut::map_mut(file) }.map_err(|source| Error::Mmap {
		path: path.to_path_buf(),
		source,
	})?;
	debug_assert_eq!(mmap.len() as u64, len);

	let outcome = minify(&mut mmap[..], config);
	log_warnings(path, &outcome.warnings);

	mmap.flush().map_err(|source| Error::Mmap {
		path: path.to_path_buf(),
		source,
	})?;
	Ok(outcome.len)
}

fn minify_buffered(file: &File, path: &Path, config: &Config) -> Result<usize, Error> {
	use std::io::{Read, Seek, SeekFrom, Write};

	let mut file = file.try_clone().map_err(|source| Error::Io {
		path: path.to_path_buf(),
		source,
	})?;
	let mut buf = Vec::new();
	file.read_to_end(&mut buf).map_err(|source| Error::Io {
		path: path.to_path_buf(),
		source,
	})?;

	let outcome = minify(&mut buf, config);
	log_warnings(path, &outcome.warnings);

	file.seek(SeekFrom::Start(0)).map_err(|source| Error::Io {
		path: path.to_path_buf(),
		source,
	})?;
	file.write_all(&buf[..outcome.len])
		.map_err(|source| Error::Io {
			path: path.to_path_buf(),
			source,
		})?;
	Ok(outcome.len)
}

fn log_warnings(path: &Path, warnings: &[jmin_core::CoreWarning]) {
	for warning in warnings {
		debug!(path = %path.display(), %warning, "non-fatal finding while minifying");
	}
}
