//! Finds the candidate files a `path` argument expands to.
//!
//! A single file is always a candidate, suffix or not. A directory is
//! walked recursively and only regular files named `*.json` are yielded.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

pub fn discover(root: &Path) -> std::io::Result<Vec<PathBuf>> {
	// Follows a symlink root (to a directory or a file) rather than
	// reporting it as neither, unlike `symlink_metadata`.
	let metadata = std::fs::metadata(root)?;

	if metadata.is_dir() {
		Ok(WalkDir::new(root)
			.follow_links(true)
			.into_iter()
			.filter_map(|entry| match entry {
				Ok(entry) => Some(entry),
				Err(err) => {
					tracing::debug!(%err, "skipping unreadable directory entry");
					None
				}
			})
			.filter(|entry| entry.file_type().is_file())
			.map(|entry| entry.into_path())
			.filter(|path| {
				path.file_name()
					.is_some_and(|name| name.as_encoded_bytes().ends_with(b".json"))
			})
			.collect())
	} else {
		// An explicit file argument is a candidate regardless of its name.
		Ok(vec![root.to_path_buf()])
	}
}
