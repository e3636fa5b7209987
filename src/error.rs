use std::fmt::{Display, Formatter};

/// An error raised while building a [`crate::Value`] or packing one to bytes.
#[derive(Debug, Eq, PartialEq)]
pub enum EncodeError {
    /// A float that is NaN or +/-infinity was passed to a finite-number constructor.
    /// Use `Value::PosInfinity`/`Value::NegInfinity` for the infinite endpoints.
    NotFinite,
    /// The magnitude of a big integer needs more than 0xffff bytes (2^524280) to
    /// represent, which doesn't fit the LLLL byte-count field.
    BigIntOverflow,
    /// A sequence/list nests deeper than `Limits::max_depth`.
    TooDeep,
    /// The encoded output would exceed `Limits::max_encoded_size`.
    TooLarge,
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::NotFinite => f.write_str("value is NaN or infinite"),
            EncodeError::BigIntOverflow => {
                f.write_str("integer magnitude too large to encode")
            }
            EncodeError::TooDeep => f.write_str("sequence nesting exceeds the configured limit"),
            EncodeError::TooLarge => f.write_str("encoded size exceeds the configured limit"),
        }
    }
}

impl std::error::Error for EncodeError {}

/// An error raised while parsing a packed byte string back into a [`crate::Value`].
#[derive(Debug, Eq, PartialEq)]
pub enum DecodeError {
    /// The buffer ended before a complete value could be read.
    UnexpectedEof,
    /// The leading byte of a value isn't one of the recognised tags.
    InvalidTag(u8),
    /// A byte inside a hex run wasn't one of `0-9a-f`.
    InvalidHexDigit(u8),
    /// A value's payload wasn't followed by the expected terminator byte(s).
    MissingTerminator,
    /// A big integer's LLLL byte-count field claims more bytes than remain in the buffer.
    TruncatedBigInt,
    /// The input buffer is larger than `Limits::max_encoded_size`.
    TooLarge,
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::UnexpectedEof => f.write_str("unexpected end of buffer"),
            DecodeError::InvalidTag(b) => {
                f.write_fmt(format_args!("unrecognized tag byte {:#04x}", b))
            }
            DecodeError::InvalidHexDigit(b) => {
                f.write_fmt(format_args!("byte {:#04x} is not a hex digit", b))
            }
            DecodeError::MissingTerminator => f.write_str("value was not properly terminated"),
            DecodeError::TruncatedBigInt => {
                f.write_str("big integer length field exceeds the remaining buffer")
            }
            DecodeError::TooLarge => f.write_str("input size exceeds the configured limit"),
        }
    }
}

impl std::error::Error for DecodeError {}
