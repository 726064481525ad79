//! The top-level value driver: a single pass over the buffer that dispatches
//! on the current byte, delegating to the string rewriter and number
//! canonicaliser for their constructs and tracking container nesting so
//! structural punctuation and commas can be told apart from noise.

use crate::config::{Config, Newlines};
use crate::cursor::Cursor;
use crate::nesting::{Container, NestingStack};
use crate::number::canonicalize_number;
use crate::strings::rewrite_string;
use crate::warning::CoreWarning;

/// Result of a single `minify` call.
pub struct MinifyOutcome {
	/// Length of the valid, minified prefix of the buffer passed in.
	pub len: usize,
	/// Non-fatal findings encountered along the way.
	pub warnings: Vec<CoreWarning>,
}

/// Minifies `buf` in place. Always returns a usable prefix length, even over
/// malformed input; see the module docs on each construct for exactly what
/// "tolerant" means for it.
pub fn minify(buf: &mut [u8], config: &Config) -> MinifyOutcome {
	let mut cur = Cursor::new(buf);
	let mut stack = NestingStack::default();
	let mut warnings = Vec::new();
	let mut state = DriverState::default();

	run(&mut cur, &mut stack, config, &mut warnings, &mut state);

	MinifyOutcome {
		len: cur.finish(),
		warnings,
	}
}

#[derive(Default)]
struct DriverState {
	/// Whether a `,` or a closer is syntactically expected next.
	comma_ok: bool,
	/// A top-level NDJSON newline was seen; flush it lazily as a single
	/// literal `\n` right before the next record, so trailing blank lines at
	/// EOF are trimmed instead of emitted.
	pending_newline: bool,
	/// Whether any top-level value has started yet. Blank lines preceding
	/// the first record carry no separator to flush and are dropped
	/// entirely, rather than emitting a leading `\n`.
	any_record_started: bool,
}

fn is_blank_ws(b: u8) -> bool {
	matches!(b, b' ' | b'\t' | b'\r')
}

fn run(
	cur: &mut Cursor,
	stack: &mut NestingStack,
	config: &Config,
	warnings: &mut Vec<CoreWarning>,
	state: &mut DriverState,
) {
	loop {
		let Some(b) = cur.peek() else { break };

		if b == b'\n' && stack.is_empty() && config.newlines.is_ndjson() {
			handle_top_level_newline(cur, config.newlines, state);
			continue;
		}
		if is_blank_ws(b) || b == b'\n' {
			cur.skip(1);
			continue;
		}

		if state.pending_newline {
			cur.skip(0);
			cur.emit(b'\n');
			state.pending_newline = false;
		}

		dispatch(cur, stack, config, warnings, state, b);
	}
}

fn handle_top_level_newline(cur: &mut Cursor, newlines: Newlines, state: &mut DriverState) {
	if newlines.preserve_blanks() {
		cur.pass(1);
	} else {
		if state.any_record_started {
			state.pending_newline = true;
		}
		cur.skip(1);
	}
}

fn dispatch(
	cur: &mut Cursor,
	stack: &mut NestingStack,
	config: &Config,
	warnings: &mut Vec<CoreWarning>,
	state: &mut DriverState,
	b: u8,
) {
	state.any_record_started = true;
	match b {
		b'"' => {
			rewrite_string(cur, warnings);
			state.comma_ok = true;
		}
		b'{' => {
			cur.skip(1);
			stack.push_object();
			state.comma_ok = false;
			consume_object_label(cur, stack, warnings);
		}
		b'[' => {
			cur.skip(1);
			stack.push_array();
			state.comma_ok = false;
		}
		b'}' => {
			if stack.top() == Container::Object {
				cur.skip(1);
				stack.pop();
				state.comma_ok = true;
			} else {
				warnings.push(CoreWarning::StructuralMismatch(cur.read_pos()));
				cur.skip(1);
			}
		}
		b']' => {
			if stack.top() == Container::Array {
				cur.skip(1);
				stack.pop();
				state.comma_ok = true;
			} else {
				warnings.push(CoreWarning::StructuralMismatch(cur.read_pos()));
				cur.skip(1);
			}
		}
		b',' => {
			if state.comma_ok && !stack.is_empty() {
				cur.skip(1);
				state.comma_ok = false;
				if stack.top() == Container::Object {
					consume_object_label(cur, stack, warnings);
				}
			} else {
				cur.skip(1);
			}
		}
		b't' => match_literal_or_drop(cur, b"true", state),
		b'f' => match_literal_or_drop(cur, b"false", state),
		b'n' => match_literal_or_drop(cur, b"null", state),
		b'-' | b'0'..=b'9' => {
			canonicalize_number(cur, config.precision);
			state.comma_ok = true;
		}
		_ => cur.skip(1),
	}
}

fn match_literal_or_drop(cur: &mut Cursor, literal: &'static [u8], state: &mut DriverState) {
	let buf = cur.as_slice();
	let start = cur.read_pos();
	if buf.len() >= start + literal.len() && &buf[start..start + literal.len()] == literal {
		cur.pass(literal.len());
		state.comma_ok = true;
	} else {
		cur.skip(1);
	}
}

/// Consumes `whitespace* (string whitespace* ':')?` right after `{` or a
/// comma inside an object. A non-match (e.g. an immediate `}`) leaves the
/// cursor untouched for the main loop to deal with.
fn consume_object_label(cur: &mut Cursor, stack: &NestingStack, warnings: &mut Vec<CoreWarning>) {
	debug_assert_eq!(stack.top(), Container::Object);

	while cur.peek().is_some_and(is_blank_ws) || cur.peek() == Some(b'\n') {
		cur.skip(1);
	}
	if cur.peek() != Some(b'"') {
		return;
	}
	rewrite_string(cur, warnings);

	while cur.peek().is_some_and(is_blank_ws) || cur.peek() == Some(b'\n') {
		cur.skip(1);
	}
	if cur.peek() == Some(b':') {
		cur.skip(1);
	} else {
		warnings.push(CoreWarning::UnterminatedConstruct(cur.read_pos()));
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn run_minify(input: &[u8], config: &Config) -> (String, usize) {
		let mut buf = input.to_vec();
		let outcome = minify(&mut buf, config);
		(
			String::from_utf8(buf[..outcome.len].to_vec()).unwrap(),
			outcome.warnings.len(),
		)
	}

	#[test]
	fn strips_insignificant_whitespace() {
		let (out, warnings) = run_minify(b"  { \"a\" : 1 ,\n \"b\" : [ 1 , 2 ] }  ", &Config::default());
		assert_eq!(out, r#"{"a":1,"b":[1,2]}"#);
		assert_eq!(warnings, 0);
	}

	#[test]
	fn empty_object_and_array() {
		let (out, _) = run_minify(b"{ }", &Config::default());
		assert_eq!(out, "{}");
		let (out, _) = run_minify(b"[ ]", &Config::default());
		assert_eq!(out, "[]");
	}

	#[test]
	fn literals_pass_through() {
		let (out, _) = run_minify(b"[true, false, null]", &Config::default());
		assert_eq!(out, "[true,false,null]");
	}

	#[test]
	fn numbers_are_canonicalised_in_context() {
		let (out, _) = run_minify(b"[1.50, 0010]", &Config::default());
		assert_eq!(out, "[1.5,10]");
	}

	#[test]
	fn unmatched_closer_is_dropped_as_noise() {
		let (out, warnings) = run_minify(b"[1]}", &Config::default());
		assert_eq!(out, "[1]");
		assert_eq!(warnings, 1);
	}

	#[test]
	fn ndjson_collapses_blank_lines_and_trims_trailing() {
		let cfg = Config {
			newlines: Newlines::Ndjson,
			..Config::default()
		};
		let (out, _) = run_minify(b"{}\n\n{}\n", &cfg);
		assert_eq!(out, "{}\n{}");
	}

	#[test]
	fn ndjson_drops_leading_blank_lines_entirely() {
		let cfg = Config {
			newlines: Newlines::Ndjson,
			..Config::default()
		};
		let (out, _) = run_minify(b"\n\n{}\n{}\n", &cfg);
		assert_eq!(out, "{}\n{}");
	}

	#[test]
	fn ndjson_preserve_blanks_keeps_every_line() {
		let cfg = Config {
			newlines: Newlines::NdjsonPreserveBlanks,
			..Config::default()
		};
		let (out, _) = run_minify(b"{}\n\n{}\n", &cfg);
		assert_eq!(out, "{}\n\n{}\n");
	}

	#[test]
	fn nested_object_keys_are_rewritten() {
		let (out, _) = run_minify(b"{\"a\\u0041\": {\"b\": 1}}", &Config::default());
		assert_eq!(out, r#"{"aA":{"b":1}}"#);
	}

	/// Full-pipeline scenarios straight from spec.md's §8 scenario table, as
	/// inline snapshots so the expected output sits right next to the case.
	#[test]
	fn spec_table_scenario_snapshots() {
		let (out, _) = run_minify(br#"{ "a" : 1 ,  "b" : [ 2, 3.00 ] }"#, &Config::default());
		insta::assert_snapshot!(out, @r#"{"a":1,"b":[2,3]}"#);

		let (out, _) = run_minify(b"\"\\u0041\\u00e9\\uD83D\\uDE00\"", &Config::default());
		insta::assert_snapshot!(out, @"\"Aé😀\"");

		let cfg = Config {
			precision: 2,
			..Config::default()
		};
		let (out, _) = run_minify(b"1.236", &cfg);
		insta::assert_snapshot!(out, @"1.24");
	}
}
