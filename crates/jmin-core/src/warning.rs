use thiserror::Error;

/// Non-fatal findings recorded while minifying. `minify` always returns a
/// valid prefix length regardless of these; they exist so a driver can log
/// them at its discretion (spec's tolerant-by-design error taxonomy).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreWarning {
	#[error("malformed \\u escape at byte offset {0}")]
	MalformedUnicodeEscape(usize),
	#[error("unterminated string, number, or literal starting at byte offset {0}")]
	UnterminatedConstruct(usize),
	#[error("unmatched closer at byte offset {0}")]
	StructuralMismatch(usize),
}
