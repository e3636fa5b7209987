//! Walks a [`crate::Value`] tree during encode, dispatching each scalar to the
//! codec that owns its tag and recursing into [`Value::List`] children by plain
//! concatenation — no frame tag, no length prefix, no separator, since every
//! scalar encoding is already self-terminating. This is the crate's counterpart to
//! the teacher's `Datum::as_sortable_bytes`/`from_sortable_bytes` discriminator-byte
//! dispatch (`encoding_datum.rs`), extended with recursion since a `Datum` there is
//! always a single scalar column, never a nested sequence.
//!
//! A consequence of "no frame tag" is that nesting is not recoverable from the
//! encoded bytes: `encode([[a], [b, [c]]])` is byte-for-byte identical to
//! `encode([a, b, c])`. Decoding therefore never reconstructs sub-lists; it just
//! reads scalars off the wire until the buffer is exhausted (see `decode_all`),
//! matching the Python reference's `LRE.load` behaviour.

use crate::error::{DecodeError, EncodeError};
use crate::limits::Limits;
use crate::numeric;
use crate::reader::Reader;
use crate::string;
use crate::value::Value;
use crate::writer::Writer;

/// Encodes `value`, descending into nested lists by concatenating each element's
/// encoding in turn. `depth` is the current nesting depth of the *input* value
/// tree, checked against `limits.max_depth` to reject runaway/self-referential
/// structures without needing a visited-set (mirrors `spec.md` §4.4).
pub fn encode_value(
    w: &mut Writer,
    value: &Value,
    limits: &Limits,
    depth: u32,
) -> Result<(), EncodeError> {
    match value {
        Value::NegInfinity => {
            numeric::write_neg_infinity(w);
            Ok(())
        }
        Value::PosInfinity => {
            numeric::write_pos_infinity(w);
            Ok(())
        }
        Value::Int(i) => numeric::write_int(w, i),
        Value::Float(f) => numeric::write_float(w, *f),
        Value::BytesOwned(b) => {
            string::write_bytes(w, b);
            Ok(())
        }
        Value::BytesRef(b) => {
            string::write_bytes(w, b);
            Ok(())
        }
        Value::TextOwned(s) => {
            string::write_text(w, s);
            Ok(())
        }
        Value::TextRef(s) => {
            string::write_text(w, s);
            Ok(())
        }
        Value::List(items) => {
            if depth >= limits.max_depth {
                return Err(EncodeError::TooDeep);
            }
            for item in items {
                encode_value(w, item, limits, depth + 1)?;
            }
            Ok(())
        }
    }
}

/// Decodes a single scalar token (number, infinity, or string) from the front of
/// `reader`. Never recurses — there is no on-wire list tag to dispatch on, since
/// lists are encoded as plain concatenation of their elements.
fn decode_scalar(reader: &mut Reader) -> Result<Value<'static>, DecodeError> {
    let tag = reader.take_byte()?;
    if tag == string::TAG_STRING {
        return string::decode(reader);
    }
    if numeric::is_number_tag(tag) {
        return numeric::decode(tag, reader);
    }
    Err(DecodeError::InvalidTag(tag))
}

/// Repeatedly decodes scalar tokens from `reader` until it is exhausted, per the
/// `Facade::load` contract: a single decoded value is returned bare, more than one
/// is returned as a flat [`Value::List`]. This is the decode-side mirror of
/// `encode_value`'s flattening — the inverse operation can't distinguish
/// `[a, b]` from `[[a], [b]]`, so it doesn't try to.
pub fn decode_all(reader: &mut Reader, limits: &Limits) -> Result<Value<'static>, DecodeError> {
    if reader.remaining().len() > limits.max_encoded_size {
        return Err(DecodeError::TooLarge);
    }
    let mut items = Vec::new();
    while !reader.is_empty() {
        items.push(decode_scalar(reader)?);
    }
    if items.len() == 1 {
        Ok(items.into_iter().next().unwrap())
    } else {
        Ok(Value::List(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn pack(value: &Value, limits: &Limits) -> Vec<u8> {
        let mut w = Writer::new(0);
        encode_value(&mut w, value, limits, 0).unwrap();
        w.into_vec()
    }

    fn unpack(bytes: &[u8], limits: &Limits) -> Value<'static> {
        let mut reader = Reader::new(bytes);
        decode_all(&mut reader, limits).unwrap()
    }

    #[test]
    fn test_empty_list_encodes_to_empty_bytes() {
        let limits = Limits::default();
        let list = Value::List(vec![]);
        let bytes = pack(&list, &limits);
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_nested_list_flattens_like_spec_vector_six() {
        // encode([2**70, 1, []]) == b"U0009400000000000000000+M01+"
        let limits = Limits::default();
        let value = Value::List(vec![
            Value::Int(BigInt::from(2).pow(70u32)),
            Value::Int(BigInt::from(1)),
            Value::List(vec![]),
        ]);
        let bytes = pack(&value, &limits);
        assert_eq!(bytes, b"U0009400000000000000000+M01+");
    }

    #[test]
    fn test_idempotent_nesting() {
        let limits = Limits::default();
        let v = Value::from(5_i64);
        let wrapped_once = Value::List(vec![v.clone()]);
        let wrapped_twice = Value::List(vec![Value::List(vec![v.clone()])]);
        assert_eq!(pack(&v, &limits), pack(&wrapped_once, &limits));
        assert_eq!(pack(&v, &limits), pack(&wrapped_twice, &limits));
    }

    #[test]
    fn test_tuple_prefix_ordering() {
        let limits = Limits::default();
        let short = Value::List(vec![Value::from(1_i64)]);
        let long = Value::List(vec![Value::from(1_i64), Value::from(0_i64)]);
        assert!(pack(&short, &limits) < pack(&long, &limits));
    }

    #[test]
    fn test_depth_limit_enforced_on_encode() {
        let limits = Limits {
            max_depth: 2,
            ..Limits::default()
        };
        let mut value = Value::List(vec![]);
        for _ in 0..3 {
            value = Value::List(vec![value]);
        }
        let mut w = Writer::new(0);
        assert_eq!(
            encode_value(&mut w, &value, &limits, 0),
            Err(EncodeError::TooDeep)
        );
    }

    #[test]
    fn test_list_of_numbers_and_strings_sorts_elementwise() {
        let limits = Limits::default();
        let a = Value::List(vec![Value::Int(BigInt::from(1)), Value::from("a")]);
        let b = Value::List(vec![Value::Int(BigInt::from(2)), Value::from("a")]);
        assert!(pack(&a, &limits) < pack(&b, &limits));
    }

    #[test]
    fn test_decode_all_flattens_to_value_list() {
        let limits = Limits::default();
        let value = Value::List(vec![Value::from(1_i64), Value::from("a")]);
        let bytes = pack(&value, &limits);
        let decoded = unpack(&bytes, &limits);
        match decoded {
            Value::List(items) => assert_eq!(items.len(), 2),
            _ => panic!("expected a flat list of two scalars"),
        }
    }

    #[test]
    fn test_decode_all_returns_bare_value_for_single_scalar() {
        let limits = Limits::default();
        let bytes = pack(&Value::from(1_i64), &limits);
        assert_eq!(unpack(&bytes, &limits), Value::from(1_i64));
    }
}
