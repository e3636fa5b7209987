//! Encodes and decodes the two string categories: raw byte strings and Unicode
//! (UTF-8) strings. Both share the `X` tag and a hex-encoded payload; the
//! terminator (`H+` for bytes, `L+` for text) is what tells them apart and also
//! keeps either from ever comparing equal to a number or to each other, since
//! `H`/`L` fall outside both the hex alphabet and the number tag set.

use crate::error::DecodeError;
use crate::reader::Reader;
use crate::value::Value;
use crate::writer::Writer;

pub const TAG_STRING: u8 = b'X';
const TERM_BYTES: u8 = b'H';
const TERM_TEXT: u8 = b'L';
const TERM_PLUS: u8 = b'+';

pub fn write_bytes(w: &mut Writer, bytes: &[u8]) {
    w.push_byte(TAG_STRING);
    w.push_hex_bytes(bytes);
    w.push_byte(TERM_BYTES);
    w.push_byte(TERM_PLUS);
}

pub fn write_text(w: &mut Writer, s: &str) {
    w.push_byte(TAG_STRING);
    w.push_hex_bytes(s.as_bytes());
    w.push_byte(TERM_TEXT);
    w.push_byte(TERM_PLUS);
}

fn hex_digits_to_bytes(digits: &str) -> Result<Vec<u8>, DecodeError> {
    let raw = digits.as_bytes();
    if raw.len() % 2 != 0 {
        return Err(DecodeError::UnexpectedEof);
    }
    let mut out = Vec::with_capacity(raw.len() / 2);
    for pair in raw.chunks_exact(2) {
        let hi = hex_nibble(pair[0])?;
        let lo = hex_nibble(pair[1])?;
        out.push((hi << 4) | lo);
    }
    Ok(out)
}

fn hex_nibble(b: u8) -> Result<u8, DecodeError> {
    match b {
        b'0'..=b'9' => Ok(b - b'0'),
        b'a'..=b'f' => Ok(b - b'a' + 10),
        _ => Err(DecodeError::InvalidHexDigit(b)),
    }
}

/// Decodes a string value given that the `X` tag byte has already been consumed.
pub fn decode<'a>(reader: &mut Reader<'a>) -> Result<Value<'static>, DecodeError> {
    let (hex_digits, first_term) = reader.take_hex_run()?;
    let bytes = hex_digits_to_bytes(hex_digits)?;
    reader.expect_byte(TERM_PLUS)?;
    match first_term {
        TERM_BYTES => Ok(Value::BytesOwned(bytes.into_boxed_slice())),
        TERM_TEXT => {
            let s = String::from_utf8(bytes).map_err(|_| DecodeError::InvalidHexDigit(0))?;
            Ok(Value::TextOwned(s.into_boxed_str()))
        }
        other => Err(DecodeError::InvalidTag(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack_bytes(b: &[u8]) -> Vec<u8> {
        let mut w = Writer::new(0);
        write_bytes(&mut w, b);
        w.into_vec()
    }

    fn pack_text(s: &str) -> Vec<u8> {
        let mut w = Writer::new(0);
        write_text(&mut w, s);
        w.into_vec()
    }

    #[test]
    fn test_bytes_roundtrip() {
        for sample in [&b""[..], b"a", b"hello world", &[0, 1, 2, 255]] {
            let bytes = pack_bytes(sample);
            let mut reader = Reader::new(&bytes);
            reader.take_byte().unwrap();
            let decoded = decode(&mut reader).unwrap();
            assert!(reader.is_empty());
            assert_eq!(decoded, Value::BytesOwned(Box::from(sample)));
        }
    }

    #[test]
    fn test_text_roundtrip() {
        for sample in ["", "abcd", "efg", "héllo wörld", "\u{1F980}"] {
            let bytes = pack_text(sample);
            let mut reader = Reader::new(&bytes);
            reader.take_byte().unwrap();
            let decoded = decode(&mut reader).unwrap();
            assert!(reader.is_empty());
            assert_eq!(decoded, Value::TextOwned(Box::from(sample)));
        }
    }

    #[test]
    fn test_bytes_and_text_sort_separately_from_each_other() {
        let bytes_enc = pack_bytes(b"abcd");
        let text_enc = pack_text("abcd");
        // Same tag and payload hex, so 'H' (0x48) < 'L' (0x4c) decides the order.
        assert!(bytes_enc < text_enc);
    }

    #[test]
    fn test_shorter_prefix_sorts_first() {
        let a = pack_text("abcd");
        let b = pack_text("efg");
        assert!(a < b);
    }

    #[test]
    fn test_literal_vectors() {
        assert_eq!(pack_text("abcdef"), b"X616263646566L+");
        assert_eq!(pack_text("china\u{6123}!"), b"X6368696e61e684a321L+");
        assert_eq!(pack_bytes(&[0x01, 0x02]), b"X0102H+");
    }

    #[test]
    fn test_strings_compare_by_first_differing_byte() {
        // Both diverge from their common prefix at a digit comparison ('1' > '0',
        // '4' > '3'); plain unsigned byte comparison of the hex payload settles it
        // the same way unsigned comparison of the original bytes would.
        assert!(pack_text("91221") > pack_text("912200000"));
        assert!(pack_text("124") > pack_text("123"));
    }

    #[test]
    fn test_true_prefix_sorts_below_its_extension() {
        // "ab" is an exact prefix of "abc"; once its hex run ends, its terminator
        // byte '+' (0x2b) sorts below any continuing hex digit (>= '0' / 0x30), so
        // the shorter value sorts first.
        assert!(pack_text("ab") < pack_text("abc"));
    }
}
