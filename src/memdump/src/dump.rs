//! `ADDRESS:HEXBYTES` dump line parsing.
//!
//! Dump files are sparse memory snapshots, one byte run per line:
//!
//! ```text
//! 1000:A9008D0004
//! 1005:60
//! ```
//!
//! The address is hex without a prefix (a `0x` prefix is tolerated) and the
//! payload is an even-length hex string written starting at that address.

use std::fmt;
use std::io::{self, BufRead};

use crate::{check_memory_size, DumpError, MemoryBuffer};

/// One decoded dump line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpLine {
    pub address: usize,
    pub bytes: Vec<u8>,
}

impl DumpLine {
    /// Parse a single line. `line` is the 1-based line number used in errors.
    pub fn parse(text: &str, line: usize) -> Result<Self, DumpError> {
        let (address, payload) = split_line(text, line)?;
        let address = parse_address(address, line)?;
        let bytes = decode_payload(payload, line)?;
        Ok(DumpLine { address, bytes })
    }

    /// Address one past the last byte of the run
    pub fn end(&self) -> usize {
        self.address + self.bytes.len()
    }
}

impl fmt::Display for DumpLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}:{}", self.address, hex::encode_upper(&self.bytes))
    }
}

/// Split a line into its address and payload halves
pub(crate) fn split_line(text: &str, line: usize) -> Result<(&str, &str), DumpError> {
    let parts: Vec<&str> = text.split(':').collect();
    let [address, payload] = parts.as_slice() else {
        return Err(DumpError::malformed(
            line,
            format!(
                "expected exactly one ':' separator, found {}",
                parts.len() - 1
            ),
        ));
    };
    Ok((*address, *payload))
}

/// Decode a whitespace-trimmed hex payload
pub(crate) fn decode_payload(payload: &str, line: usize) -> Result<Vec<u8>, DumpError> {
    let payload = payload.trim();
    hex::decode(payload)
        .map_err(|e| DumpError::malformed(line, format!("bad hex payload {payload:?}: {e}")))
}

fn parse_address(address: &str, line: usize) -> Result<usize, DumpError> {
    let address = address.trim();
    let digits = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);

    usize::from_str_radix(digits, 16)
        .map_err(|e| DumpError::malformed(line, format!("bad address {address:?}: {e}")))
}

/// Unwrap one `lines()` item; text that is not UTF-8 is a malformed line
pub(crate) fn line_text(text: io::Result<String>, line: usize) -> Result<String, DumpError> {
    text.map_err(|e| match e.kind() {
        io::ErrorKind::InvalidData => DumpError::malformed(line, "line is not valid UTF-8"),
        _ => DumpError::Io(e),
    })
}

/// Parse dump text into a buffer of `size` bytes
pub fn parse_dump(text: &str, size: usize) -> Result<MemoryBuffer, DumpError> {
    read_dump(text.as_bytes(), size)
}

/// Read dump lines from `reader` into a buffer of `size` bytes.
///
/// Lines are applied in order, so a later line wins where two runs overlap.
/// The first bad line aborts the whole read. `size` must pass
/// [`check_memory_size`].
pub fn read_dump<R: BufRead>(reader: R, size: usize) -> Result<MemoryBuffer, DumpError> {
    let mut buffer = MemoryBuffer::new(check_memory_size(size)?);
    let mut count = 0;

    for (idx, text) in reader.lines().enumerate() {
        let line = idx + 1;
        let text = line_text(text, line)?;
        let parsed = DumpLine::parse(&text, line)?;
        buffer.write(parsed.address, &parsed.bytes, line)?;
        count = line;
    }

    tracing::debug!(lines = count, size, "parsed memory dump");
    Ok(buffer)
}
