//! Encodes and decodes the number categories of the total order: negative/positive
//! infinity, big integers (`D`/`U` tags) and finite "medium" numbers (`M` tag, shared
//! by integers and floats alike). Grounded on the teacher crate's
//! `SortableEncoding` varint scheme (`encoding_core.rs`): a leading discriminator
//! that picks the payload's shape, nine's-complementing the payload bytes to reverse
//! sort order for negative values instead of a separate decode path per sign.

use crate::error::{DecodeError, EncodeError};
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{ToPrimitive, Zero};

const TAG_NEG_INF: u8 = b'E';
const TAG_NEG_BIG: u8 = b'D';
const TAG_MEDIUM: u8 = b'M';
const TAG_POS_BIG: u8 = b'U';
const TAG_POS_INF: u8 = b'F';

const TERM_PLUS: u8 = b'+';
const TERM_TILDE: u8 = b'~';

/// Big integer magnitudes above this many bytes don't fit the four hex digit
/// LLLL length field (0xffff bytes == 2^524280).
const MAX_BIG_BYTES: usize = 0xffff;

fn complement_hex(digits: &str) -> String {
    digits
        .bytes()
        .map(|b| {
            let v = match b {
                b'0'..=b'9' => b - b'0',
                b'a'..=b'f' => b - b'a' + 10,
                _ => unreachable!("digits come from a validated hex run"),
            };
            let complemented = 15 - v;
            if complemented < 10 {
                b'0' + complemented
            } else {
                b'a' + (complemented - 10)
            }
        })
        .map(|b| b as char)
        .collect()
}

fn pad_even(hex: String) -> String {
    if hex.len() % 2 == 1 {
        format!("0{}", hex)
    } else {
        hex
    }
}

pub fn write_neg_infinity(w: &mut Writer) {
    w.push_byte(TAG_NEG_INF);
}

pub fn write_pos_infinity(w: &mut Writer) {
    w.push_byte(TAG_POS_INF);
}

fn write_big(w: &mut Writer, negative: bool, magnitude_hex: String) -> Result<(), EncodeError> {
    let magnitude_hex = pad_even(magnitude_hex);
    let byte_len = magnitude_hex.len() / 2;
    if byte_len > MAX_BIG_BYTES {
        return Err(EncodeError::BigIntOverflow);
    }
    let length_field = format!("{:04x}", byte_len);
    let payload = format!("{}{}", length_field, magnitude_hex);
    if negative {
        w.push_byte(TAG_NEG_BIG);
        w.push_hex_digits(&complement_hex(&payload));
        w.push_byte(TERM_TILDE);
    } else {
        w.push_byte(TAG_POS_BIG);
        w.push_hex_digits(&payload);
        w.push_byte(TERM_PLUS);
    }
    Ok(())
}

fn write_medium(w: &mut Writer, negative: bool, int_digits: &str, frac_digits: &str) {
    debug_assert!(!int_digits.is_empty() && int_digits.len() <= 15);
    let is_zero = int_digits == "0" && frac_digits.is_empty();
    let ee = (int_digits.len() - 1) as u8;
    let payload = format!("{:x}{}{}", ee, int_digits, frac_digits);
    w.push_byte(TAG_MEDIUM);
    if is_zero {
        w.push_hex_digits(&payload);
        w.push_byte(TERM_PLUS);
    } else if negative {
        w.push_hex_digits(&complement_hex(&payload));
        w.push_byte(TERM_TILDE);
    } else {
        w.push_hex_digits(&payload);
        w.push_byte(TERM_PLUS);
    }
}

/// Encodes an arbitrary precision integer. Routes to the Medium form when the
/// magnitude's hex representation is 15 digits or fewer, otherwise to the Big form.
pub fn write_int(w: &mut Writer, value: &BigInt) -> Result<(), EncodeError> {
    if value.is_zero() {
        write_medium(w, false, "0", "");
        return Ok(());
    }
    let negative = value.sign() == Sign::Minus;
    let magnitude = value.magnitude();
    let hex = magnitude.to_str_radix(16);
    if hex.len() <= 15 {
        write_medium(w, negative, &hex, "");
    } else {
        write_big(w, negative, hex)?;
    }
    Ok(())
}

/// Encodes a finite `f64`. Caller is responsible for rejecting NaN/infinite values
/// before reaching here (see `Value::float`).
pub fn write_float(w: &mut Writer, value: f64) -> Result<(), EncodeError> {
    debug_assert!(value.is_finite());
    let bits = value.to_bits();
    let sign = (bits >> 63) & 1 == 1;
    let biased_exp = ((bits >> 52) & 0x7ff) as i64;
    let mantissa_bits = bits & ((1u64 << 52) - 1);

    if biased_exp == 0 && mantissa_bits == 0 {
        // +0.0 or -0.0, sign is not observable in the encoding.
        write_medium(w, false, "0", "");
        return Ok(());
    }

    let (mut mantissa, mut bin_exp) = if biased_exp == 0 {
        (mantissa_bits, -1022 - 52)
    } else {
        (mantissa_bits | (1u64 << 52), biased_exp - 1023 - 52)
    };

    let tz = mantissa.trailing_zeros();
    if tz > 0 {
        mantissa >>= tz;
        bin_exp += tz as i64;
    }

    if bin_exp >= 0 {
        let magnitude = BigUint::from(mantissa) << (bin_exp as u64);
        let int_digits = magnitude.to_str_radix(16);
        if int_digits.len() <= 15 {
            write_medium(w, sign, &int_digits, "");
        } else {
            // A magnitude this large carries no fractional bits (see SPEC_FULL.md
            // section 3.2), so it is safe to route through the same big-integer path
            // used for Value::Int.
            write_big(w, sign, int_digits)?;
        }
        return Ok(());
    }

    let shift = (-bin_exp) as u64;
    let align = (4 - (shift % 4)) % 4;
    let magnitude = BigUint::from(mantissa) << align;
    let shift_aligned = shift + align;
    let frac_len = (shift_aligned / 4) as usize;

    let mut full_hex = magnitude.to_str_radix(16);
    if full_hex.len() < frac_len {
        full_hex = format!("{}{}", "0".repeat(frac_len - full_hex.len()), full_hex);
    }
    let total = full_hex.len();
    let (int_part, frac_part) = if total <= frac_len {
        ("0".to_string(), full_hex)
    } else {
        let split = total - frac_len;
        (full_hex[..split].to_string(), full_hex[split..].to_string())
    };
    let frac_trimmed = frac_part.trim_end_matches('0');

    if int_part.len() <= 15 {
        write_medium(w, sign, &int_part, frac_trimmed);
    } else {
        debug_assert!(frac_trimmed.is_empty());
        write_big(w, sign, int_part)?;
    }
    Ok(())
}

/// Reconstructs the exact `f64` represented by `int_digits` . `frac_digits` (hex).
fn hex_to_f64(int_digits: &str, frac_digits: &str) -> f64 {
    let combined = format!("{}{}", int_digits, frac_digits);
    let n = BigUint::parse_bytes(combined.as_bytes(), 16).unwrap_or_else(BigUint::zero);
    let frac_len = frac_digits.len() as i64;
    let bin_exp = -4 * frac_len;

    let bits = n.bits();
    let (mantissa_u64, exp_adjust) = if bits > 53 {
        let shift = bits - 53;
        let shifted: BigUint = n >> shift;
        (shifted.to_u64().expect("shifted to <=53 bits"), shift as i64)
    } else {
        (n.to_u64().expect("checked <=53 bits"), 0)
    };
    let final_exp = bin_exp + exp_adjust;
    (mantissa_u64 as f64) * 2f64.powi(final_exp as i32)
}

fn decode_big(reader: &mut Reader, negative: bool) -> Result<Value<'static>, DecodeError> {
    let (digits_raw, term) = reader.take_hex_run()?;
    let expected_term = if negative { TERM_TILDE } else { TERM_PLUS };
    if term != expected_term {
        return Err(DecodeError::MissingTerminator);
    }
    let digits = if negative {
        complement_hex(digits_raw)
    } else {
        digits_raw.to_string()
    };
    if digits.len() < 4 {
        return Err(DecodeError::TruncatedBigInt);
    }
    let byte_len = u32::from_str_radix(&digits[..4], 16)
        .map_err(|_| DecodeError::TruncatedBigInt)? as usize;
    let hex_len = byte_len * 2;
    if digits.len() != 4 + hex_len {
        return Err(DecodeError::TruncatedBigInt);
    }
    let magnitude = BigUint::parse_bytes(digits[4..].as_bytes(), 16)
        .ok_or(DecodeError::TruncatedBigInt)?;
    let sign = if negative { Sign::Minus } else { Sign::Plus };
    Ok(Value::Int(BigInt::from_biguint(sign, magnitude)))
}

fn decode_medium(reader: &mut Reader) -> Result<Value<'static>, DecodeError> {
    let (digits_raw, term) = reader.take_hex_run()?;
    let negative = match term {
        TERM_PLUS => false,
        TERM_TILDE => true,
        _ => return Err(DecodeError::MissingTerminator),
    };
    let digits = if negative {
        complement_hex(digits_raw)
    } else {
        digits_raw.to_string()
    };
    if digits.is_empty() {
        return Err(DecodeError::UnexpectedEof);
    }
    let ee = u8::from_str_radix(&digits[0..1], 16).map_err(|_| DecodeError::UnexpectedEof)?;
    let digit_count = ee as usize + 1;
    if digits.len() < 1 + digit_count {
        return Err(DecodeError::UnexpectedEof);
    }
    let int_part = &digits[1..1 + digit_count];
    let frac_part = &digits[1 + digit_count..];

    if int_part == "0" && frac_part.is_empty() {
        return Ok(Value::Int(BigInt::zero()));
    }

    if frac_part.is_empty() {
        let magnitude =
            BigUint::parse_bytes(int_part.as_bytes(), 16).ok_or(DecodeError::UnexpectedEof)?;
        let sign = if negative { Sign::Minus } else { Sign::Plus };
        Ok(Value::Int(BigInt::from_biguint(sign, magnitude)))
    } else {
        let magnitude = hex_to_f64(int_part, frac_part);
        Ok(Value::Float(if negative { -magnitude } else { magnitude }))
    }
}

/// Decodes a number given its already-consumed tag byte.
pub fn decode(tag: u8, reader: &mut Reader) -> Result<Value<'static>, DecodeError> {
    match tag {
        TAG_NEG_INF => Ok(Value::NegInfinity),
        TAG_POS_INF => Ok(Value::PosInfinity),
        TAG_POS_BIG => decode_big(reader, false),
        TAG_NEG_BIG => decode_big(reader, true),
        TAG_MEDIUM => decode_medium(reader),
        _ => Err(DecodeError::InvalidTag(tag)),
    }
}

pub fn is_number_tag(tag: u8) -> bool {
    matches!(
        tag,
        TAG_NEG_INF | TAG_NEG_BIG | TAG_MEDIUM | TAG_POS_BIG | TAG_POS_INF
    )
}
