//! Flatten dump files into a raw byte stream.
//!
//! Addresses are ignored: every payload is appended in line order. Useful
//! for feeding emulator dumps to a disassembler.

use std::io::BufRead;

use crate::dump::{decode_payload, line_text, split_line};
use crate::DumpError;

/// Append every decoded payload from `reader` to `out`, returning the byte count.
///
/// On error `out` may hold the payloads of the lines before the bad one.
pub fn append_dump<R: BufRead>(reader: R, out: &mut Vec<u8>) -> Result<usize, DumpError> {
    let before = out.len();

    for (idx, text) in reader.lines().enumerate() {
        let line = idx + 1;
        let text = line_text(text, line)?;
        let (_, payload) = split_line(&text, line)?;
        out.extend(decode_payload(payload, line)?);
    }

    Ok(out.len() - before)
}

/// Decode every payload from `reader` into a fresh byte vector
pub fn decode_dump<R: BufRead>(reader: R) -> Result<Vec<u8>, DumpError> {
    let mut out = Vec::new();
    append_dump(reader, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignores_addresses() {
        let mut out = Vec::new();
        assert_eq!(append_dump("1000:AABB".as_bytes(), &mut out).unwrap(), 2);
        assert_eq!(append_dump("2000:CCDD\n".as_bytes(), &mut out).unwrap(), 2);

        assert_eq!(out, vec![0xAA, 0xBB, 0xCC, 0xDD]);
    }

    #[test]
    fn test_line_order_not_address_order() {
        let bytes = decode_dump("0010:02\n0000:01\n".as_bytes()).unwrap();
        assert_eq!(bytes, vec![0x02, 0x01]);
    }

    #[test]
    fn test_address_is_not_validated() {
        let bytes = decode_dump("not-an-address: 7f ".as_bytes()).unwrap();
        assert_eq!(bytes, vec![0x7F]);
    }

    #[test]
    fn test_missing_separator() {
        let err = decode_dump("0000:00\nabcREF".as_bytes()).unwrap_err();
        assert!(matches!(err, DumpError::MalformedLine { line: 2, .. }));
    }

    #[test]
    fn test_odd_length_payload() {
        let err = decode_dump("0000:ABC".as_bytes()).unwrap_err();
        assert!(matches!(err, DumpError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn test_invalid_hex() {
        assert!(decode_dump("0000:GG".as_bytes()).is_err());
    }

    #[test]
    fn test_non_utf8_line_has_line_number() {
        let data: &[u8] = b"0000:AA\n\xC3\x28:BB\n";
        let err = decode_dump(data).unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_empty_input() {
        assert!(decode_dump("".as_bytes()).unwrap().is_empty());
    }
}
