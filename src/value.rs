use crate::error::EncodeError;
use num_bigint::BigInt;

/// In memory representation of a value this crate can pack into a sortable byte
/// string. Mirrors the teacher crate's `Datum<'a>` enum (`src/data/src/datum.rs`):
/// an owned/borrowed pair of variants per reference type, so a caller reading
/// values back out of a key-value store's borrowed buffer can decode into
/// `BytesRef`/`TextRef` without an extra allocation.
#[derive(Clone, Debug, PartialEq)]
pub enum Value<'a> {
    NegInfinity,
    PosInfinity,
    Int(BigInt),
    Float(f64),
    BytesOwned(Box<[u8]>),
    BytesRef(&'a [u8]),
    TextOwned(Box<str>),
    TextRef(&'a str),
    /// An ordered sequence of values, itself ordered lexicographically by element.
    List(Vec<Value<'a>>),
}

impl<'a> Value<'a> {
    /// Builds a finite number value, rejecting NaN and +/-infinity - use
    /// `Value::NegInfinity`/`Value::PosInfinity` for the infinite endpoints of the
    /// order instead of a wrapped float.
    pub fn float(f: f64) -> Result<Value<'static>, EncodeError> {
        if f.is_finite() {
            Ok(Value::Float(f))
        } else {
            Err(EncodeError::NotFinite)
        }
    }

    pub fn bytes(bytes: &'a [u8]) -> Value<'a> {
        Value::BytesRef(bytes)
    }

    pub fn text(s: &'a str) -> Value<'a> {
        Value::TextRef(s)
    }
}

impl From<i64> for Value<'static> {
    fn from(i: i64) -> Self {
        Value::Int(BigInt::from(i))
    }
}

impl From<i32> for Value<'static> {
    fn from(i: i32) -> Self {
        Value::Int(BigInt::from(i))
    }
}

impl From<BigInt> for Value<'static> {
    fn from(i: BigInt) -> Self {
        Value::Int(i)
    }
}

impl From<String> for Value<'static> {
    fn from(s: String) -> Self {
        Value::TextOwned(s.into_boxed_str())
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::TextRef(s)
    }
}

impl From<Vec<u8>> for Value<'static> {
    fn from(b: Vec<u8>) -> Self {
        Value::BytesOwned(b.into_boxed_slice())
    }
}

impl<'a> From<&'a [u8]> for Value<'a> {
    fn from(b: &'a [u8]) -> Self {
        Value::BytesRef(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_rejects_non_finite() {
        assert_eq!(Value::float(f64::NAN), Err(EncodeError::NotFinite));
        assert_eq!(Value::float(f64::INFINITY), Err(EncodeError::NotFinite));
        assert_eq!(Value::float(f64::NEG_INFINITY), Err(EncodeError::NotFinite));
        assert!(Value::float(1.5).is_ok());
    }

    #[test]
    fn test_from_impls() {
        assert_eq!(Value::from(5_i64), Value::Int(BigInt::from(5)));
        assert_eq!(Value::from("abc"), Value::TextRef("abc"));
        assert_eq!(
            Value::from(String::from("abc")),
            Value::TextOwned(Box::from("abc"))
        );
    }
}
