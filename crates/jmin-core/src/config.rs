/// Options the core consults while minifying. Owned by the caller; the core
/// never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
	/// Decimal place to round numbers to: `N` keeps `N` fractional digits,
	/// a negative `N` rounds to `10^(-N)`. `i64::MAX` disables rounding.
	pub precision: i64,
	/// Newline-delimited JSON handling.
	pub newlines: Newlines,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			precision: i64::MAX,
			newlines: Newlines::Off,
		}
	}
}

/// NDJSON handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Newlines {
	/// Whitespace, including newlines, is stripped like any other value.
	#[default]
	Off,
	/// One JSON value per line; consecutive blank lines collapse to one and
	/// a trailing blank line is trimmed.
	Ndjson,
	/// Like `Ndjson`, but every blank input line is preserved verbatim.
	NdjsonPreserveBlanks,
}

impl Newlines {
	pub(crate) fn is_ndjson(self) -> bool {
		!matches!(self, Newlines::Off)
	}

	pub(crate) fn preserve_blanks(self) -> bool {
		matches!(self, Newlines::NdjsonPreserveBlanks)
	}
}
