//! Lexicographic Remainder Encoding (LRE).
//!
//! Packs a [`Value`] — an arbitrary precision integer, a finite `f64`, a byte
//! string, a Unicode string, the infinite endpoints of the numeric order, or an
//! ordered list of any of these — into a byte string whose unsigned
//! lexicographic order matches the value's place in the total order described in
//! `SPEC_FULL.md`. The packed bytes are meant to be used directly as a primary
//! key in an ordered key-value store, the same role the teacher crate's
//! `Datum::as_sortable_bytes` plays for its RocksDB backed tables.
//!
//! ```
//! use lre::{pack, load, Value};
//!
//! let a = pack(&Value::from(1_i64));
//! let b = pack(&Value::from(2_i64));
//! assert!(a < b);
//! assert_eq!(load(&a).unwrap(), Value::from(1_i64));
//! ```

mod composite;
mod error;
mod limits;
mod numeric;
mod reader;
mod string;
mod value;
mod writer;

pub use error::{DecodeError, EncodeError};
pub use limits::Limits;
pub use value::Value;
pub use writer::Writer;

use reader::Reader;

/// Packs `value` using the default [`Limits`] and no buffer preallocation.
pub fn pack(value: &Value) -> Vec<u8> {
    pack_with(value, 0, &Limits::default()).expect("default limits are never exceeded by a single call site; use pack_with for untrusted input sizes")
}

/// Packs `value`, pre-allocating `capacity_hint` bytes and enforcing `limits`.
pub fn pack_with(
    value: &Value,
    capacity_hint: usize,
    limits: &Limits,
) -> Result<Vec<u8>, EncodeError> {
    let mut w = Writer::new(capacity_hint);
    composite::encode_value(&mut w, value, limits, 0)?;
    if w.len() > limits.max_encoded_size {
        return Err(EncodeError::TooLarge);
    }
    Ok(w.into_vec())
}

/// Unpacks `bytes`, decoding scalar tokens until the buffer is exhausted. A single
/// decoded token is returned bare; more than one is returned as a [`Value::List`]
/// (see `composite::decode_all` — the list/tuple boundary isn't recoverable from
/// the wire format, only the flat sequence of scalars that were concatenated).
pub fn load(bytes: &[u8]) -> Result<Value<'static>, DecodeError> {
    load_with(bytes, &Limits::default())
}

/// Unpacks `bytes` using custom resource `limits`.
pub fn load_with(bytes: &[u8], limits: &Limits) -> Result<Value<'static>, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::UnexpectedEof);
    }
    let mut reader = Reader::new(bytes);
    composite::decode_all(&mut reader, limits)
}
