//! Arbitrary-precision digit parsing.
//!
//! Integer literals that overflow `i64` are re-parsed from their digit text
//! here. Two strategies exist:
//!
//! - [`parse_power_of_two`]: bases 2, 4, 8, 16 and 32 map each digit to a
//!   fixed number of bits, so digits are packed straight into 32-bit limbs.
//! - [`parse_universal`]: any base in `2..=36`. Digits are grouped into the
//!   largest chunk whose value fits a `u32` and folded in with one
//!   multiply-add per chunk.
//!
//! [`parse_digits`] picks the right one. Both are public so their agreement
//! can be tested directly.
//!
//! Digit text may contain `_` separators, which are skipped. Parsing stops at
//! the first character that is not a digit of the base.

use num_bigint::BigUint;

use crate::classify::digit_value;

/// Digits of `text` in `base`, most significant first, separators skipped.
fn digits(text: &str, base: u32) -> impl Iterator<Item = u32> + '_ {
    text.chars()
        .filter(|&c| c != '_')
        .map(move |c| digit_value(c).filter(|&d| d < base))
        .take_while(Option::is_some)
        .flatten()
}

/// Parse `text` as an unsigned integer in `base` (`2..=36`).
pub fn parse_digits(text: &str, base: u32) -> BigUint {
    debug_assert!((2..=36).contains(&base), "unsupported base {base}");
    if base.is_power_of_two() {
        parse_power_of_two(text, base)
    } else {
        parse_universal(text, base)
    }
}

/// Bit-packing parser for power-of-two bases.
pub fn parse_power_of_two(text: &str, base: u32) -> BigUint {
    debug_assert!(base.is_power_of_two() && (2..=32).contains(&base));
    let bits_per_digit = base.trailing_zeros();
    let values: Vec<u32> = digits(text, base).collect();

    let mut limbs: Vec<u32> = Vec::with_capacity(values.len() * bits_per_digit as usize / 32 + 1);
    let mut limb = 0u32;
    let mut filled = 0u32;

    // Least significant digit first.
    for &digit in values.iter().rev() {
        limb |= digit << filled;
        filled += bits_per_digit;
        if filled >= 32 {
            limbs.push(limb);
            filled -= 32;
            // Bits of `digit` that did not fit the finished limb.
            limb = if filled == 0 {
                0
            } else {
                digit >> (bits_per_digit - filled)
            };
        }
    }
    if filled > 0 {
        limbs.push(limb);
    }

    BigUint::new(limbs)
}

/// Largest `k` with `base^k <= u32::MAX`, and `base^k`.
pub fn chunk_params(base: u32) -> (u32, u32) {
    let mut count = 1;
    let mut power = base;
    while let Some(next) = power.checked_mul(base) {
        power = next;
        count += 1;
    }
    (count, power)
}

/// Chunked multiply-add parser for any base in `2..=36`.
pub fn parse_universal(text: &str, base: u32) -> BigUint {
    let (chunk_len, _) = chunk_params(base);
    let mut result = BigUint::default();
    let mut chunk = 0u32;
    let mut multiplier = 1u32;
    let mut in_chunk = 0u32;

    for digit in digits(text, base) {
        chunk = chunk * base + digit;
        multiplier *= base;
        in_chunk += 1;
        if in_chunk == chunk_len {
            result *= multiplier;
            result += chunk;
            chunk = 0;
            multiplier = 1;
            in_chunk = 0;
        }
    }
    if in_chunk > 0 {
        result *= multiplier;
        result += chunk;
    }

    result
}
