//! Canonicalises a JSON number token: strips a leading `+`/insignificant
//! zeros, rounds to a configured precision, and picks the shortest of a
//! plain-integer, fixed-fraction, or exponential rendering.

use crate::cursor::Cursor;

struct NumberToken {
	negative: bool,
	int_start: usize,
	int_end: usize,
	frac: Option<(usize, usize)>,
	exponent_value: i64,
	end: usize,
}

fn scan_digits(buf: &[u8], mut pos: usize) -> usize {
	while buf.get(pos).is_some_and(u8::is_ascii_digit) {
		pos += 1;
	}
	pos
}

/// Entry condition: `buf[start]` is `-` or an ASCII digit.
fn scan_number(buf: &[u8], start: usize) -> NumberToken {
	let mut pos = start;
	let negative = buf[pos] == b'-';
	if negative {
		pos += 1;
	}
	let int_start = pos;
	let int_end = scan_digits(buf, pos);
	pos = int_end;

	let frac = if buf.get(pos) == Some(&b'.') {
		let frac_start = pos + 1;
		let frac_end = scan_digits(buf, frac_start);
		if frac_end > frac_start {
			pos = frac_end;
			Some((frac_start, frac_end))
		} else {
			None
		}
	} else {
		None
	};

	let mut exponent_value = 0i64;
	if matches!(buf.get(pos), Some(b'e' | b'E')) {
		let mut epos = pos + 1;
		let exp_negative = match buf.get(epos) {
			Some(b'-') => {
				epos += 1;
				true
			}
			Some(b'+') => {
				epos += 1;
				false
			}
			_ => false,
		};
		let digit_start = epos;
		let digit_end = scan_digits(buf, digit_start);
		if digit_end > digit_start {
			let mut value: i64 = 0;
			for &d in &buf[digit_start..digit_end] {
				value = value.saturating_mul(10).saturating_add((d - b'0') as i64);
			}
			exponent_value = if exp_negative { -value } else { value };
			pos = digit_end;
		}
	}

	NumberToken {
		negative,
		int_start,
		int_end,
		frac,
		exponent_value,
		end: pos,
	}
}

/// Returns significant digits (no leading/trailing zeros) with the base-10
/// place value of the first and last digit, or `None` when the value is
/// zero.
fn significant_digits(buf: &[u8], tok: &NumberToken) -> Option<(Vec<u8>, i64, i64)> {
	let int_digits = &buf[tok.int_start..tok.int_end];
	let frac_digits = tok.frac.map(|(s, e)| &buf[s..e]).unwrap_or(&[]);

	let mut digits = Vec::with_capacity(int_digits.len() + frac_digits.len());
	digits.extend_from_slice(int_digits);
	digits.extend_from_slice(frac_digits);

	// place value of the first digit of `int_digits`, before the exponent shift
	let base_max_exponent = int_digits.len() as i64 - 1;

	let first_nonzero = digits.iter().position(|&d| d != b'0')?;
	let last_nonzero = digits.iter().rposition(|&d| d != b'0')?;

	let trimmed = digits[first_nonzero..=last_nonzero].to_vec();
	let max_exponent = base_max_exponent - first_nonzero as i64 + tok.exponent_value;
	let min_exponent = base_max_exponent - last_nonzero as i64 + tok.exponent_value;
	Some((trimmed, max_exponent, min_exponent))
}

/// Half-away-from-zero rounding to `precision` fractional digits (a negative
/// `precision` rounds to `10^(-precision)`), with carry propagation and
/// trailing-zero stripping. Returns `None` when the result rounds to zero.
fn round(
	digits: Vec<u8>,
	max_exponent: i64,
	min_exponent: i64,
	precision: i64,
) -> Option<(Vec<u8>, i64, i64)> {
	// Digit at `max_exponent - precision` is the last kept digit; round at the
	// next one. Computed in `i128` since `precision` (and thus `-precision - 1`)
	// can be `i64::MIN`, which has no `i64` negation.
	let round_at_exponent = -(precision as i128) - 1;
	if round_at_exponent < i128::from(min_exponent) {
		// Nothing to round away.
		return Some((digits, max_exponent, min_exponent));
	}
	if round_at_exponent > i128::from(max_exponent) {
		// Rounding point is beyond the most significant digit: rounds to zero.
		return None;
	}

	let keep = (i128::from(max_exponent) - round_at_exponent) as usize; // digits kept, >= 0
	let round_up = digits[keep] >= b'5';
	let mut kept: Vec<u8> = digits[..keep].to_vec();

	let mut new_max_exponent = max_exponent;
	if round_up {
		let mut i = kept.len();
		loop {
			if i == 0 {
				kept.insert(0, b'1');
				new_max_exponent += 1;
				break;
			}
			i -= 1;
			if kept[i] == b'9' {
				kept[i] = b'0';
			} else {
				kept[i] += 1;
				break;
			}
		}
	}

	let mut new_min_exponent = new_max_exponent - kept.len() as i64 + 1;
	while kept.last() == Some(&b'0') {
		kept.pop();
		new_min_exponent += 1;
	}

	if kept.is_empty() {
		None
	} else {
		Some((kept, new_max_exponent, new_min_exponent))
	}
}

fn push_decimal(out: &mut Vec<u8>, n: i64) {
	if n == 0 {
		out.push(b'0');
		return;
	}
	let mut n = n;
	if n < 0 {
		out.push(b'-');
		n = -n;
	}
	let start = out.len();
	while n > 0 {
		out.push(b'0' + (n % 10) as u8);
		n /= 10;
	}
	out[start..].reverse();
}

fn build_output(digits: &[u8], max_exponent: i64, min_exponent: i64, negative: bool) -> Vec<u8> {
	let digit_width = digits.len() as i64;
	let zeroes = if min_exponent > 0 {
		min_exponent
	} else if max_exponent < 0 {
		-max_exponent
	} else {
		0
	};

	let mut out = Vec::with_capacity(digits.len() + 8);
	if negative {
		out.push(b'-');
	}

	if zeroes >= 3 {
		out.push(digits[0]);
		if digit_width > 1 {
			out.push(b'.');
			out.extend_from_slice(&digits[1..]);
		}
		out.push(b'E');
		push_decimal(&mut out, max_exponent);
		return out;
	}

	if min_exponent >= 0 {
		// pure integer, possibly with trailing zeros to restore place value
		out.extend_from_slice(digits);
		for _ in 0..min_exponent {
			out.push(b'0');
		}
		return out;
	}

	if max_exponent < 0 {
		out.push(b'0');
		out.push(b'.');
		for _ in 0..(-max_exponent - 1) {
			out.push(b'0');
		}
		out.extend_from_slice(digits);
		return out;
	}

	// splice: integer part is `max_exponent + 1` digits, rest is fraction
	let int_len = (max_exponent + 1) as usize;
	out.extend_from_slice(&digits[..int_len]);
	out.push(b'.');
	out.extend_from_slice(&digits[int_len..]);
	out
}

/// Entry condition: `cursor.peek()` is `-` or an ASCII digit.
pub(crate) fn canonicalize_number(cur: &mut Cursor, precision: i64) {
	let start = cur.read_pos();
	let tok = scan_number(cur.as_slice(), start);
	let token_len = tok.end - start;

	let rendered = match significant_digits(cur.as_slice(), &tok) {
		None => b"0".to_vec(),
		Some((digits, max_exp, min_exp)) => match round(digits, max_exp, min_exp, precision) {
			None => b"0".to_vec(),
			Some((digits, max_exp, min_exp)) => {
				build_output(&digits, max_exp, min_exp, tok.negative)
			}
		},
	};

	cur.skip(token_len);
	cur.emit_bytes(&rendered);
}

#[cfg(test)]
mod tests {
	use super::*;

	fn run(input: &[u8], precision: i64) -> String {
		let mut buf = input.to_vec();
		buf.push(b' '); // sentinel so `end` never equals buf.len() prematurely
		let mut cur = Cursor::new(&mut buf);
		canonicalize_number(&mut cur, precision);
		cur.pass(1); // sentinel
		let len = cur.finish();
		String::from_utf8(buf[..len - 1].to_vec()).unwrap()
	}

	#[test]
	fn strips_leading_zero_and_trailing_exponent_noise() {
		assert_eq!(run(b"0001.5e0", i64::MAX), "1.5");
	}

	#[test]
	fn picks_exponential_form_for_small_magnitudes() {
		assert_eq!(run(b"0.00012", i64::MAX), "1.2E-4");
	}

	#[test]
	fn negative_zero_collapses_to_zero() {
		assert_eq!(run(b"-0.000", i64::MAX), "0");
	}

	#[test]
	fn large_round_number_uses_exponential_form() {
		assert_eq!(run(b"100000", i64::MAX), "1E5");
	}

	#[test]
	fn three_leading_fraction_zeros_mirror_the_integer_side_threshold() {
		// `max_exponent == -3` is the fraction-side mirror of `100000`'s
		// `max_exponent == 5`: both need exactly 3 zeros to restore place
		// value, so both should cross over to exponential form.
		assert_eq!(run(b"0.001", i64::MAX), "1E-3");
	}

	#[test]
	fn two_leading_fraction_zeros_stay_in_fixed_form() {
		assert_eq!(run(b"0.01", i64::MAX), "0.01");
	}

	#[test]
	fn rounds_to_requested_precision() {
		assert_eq!(run(b"1.236", 2), "1.24");
	}

	#[test]
	fn rounding_carries_through_all_digits() {
		assert_eq!(run(b"9.95", 1), "10");
	}

	#[test]
	fn plain_integers_pass_through_unchanged_in_value() {
		assert_eq!(run(b"42", i64::MAX), "42");
	}

	#[test]
	fn preserves_large_integer_magnitude_without_exponent_when_below_threshold() {
		assert_eq!(run(b"1200", i64::MAX), "1200");
	}

	#[test]
	fn multi_digit_mantissa_exponential_form_uses_max_exponent() {
		assert_eq!(run(b"123e6", i64::MAX), "1.23E8");
	}

	#[test]
	fn negative_numbers_keep_their_sign() {
		assert_eq!(run(b"-42.5", i64::MAX), "-42.5");
	}

	#[test]
	fn extreme_negative_precision_rounds_to_zero_without_overflow() {
		assert_eq!(run(b"123.45", i64::MIN), "0");
		assert_eq!(run(b"0", i64::MIN), "0");
	}

	#[test]
	fn extreme_positive_precision_is_equivalent_to_no_rounding() {
		assert_eq!(run(b"1.236", i64::MAX - 1), "1.236");
	}
}
