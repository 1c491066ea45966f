//! Error types shared by the dump parser and concatenator.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DumpError {
    /// A line that is not `ADDRESS:HEXBYTES`, or whose payload is not valid hex
    #[error("Invalid memory line found line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    /// A byte run that would land past the end of the memory buffer
    #[error(
        "Line {line} writes {len} bytes at ${address:04X}, past the end of a {size:#x} byte buffer"
    )]
    OutOfRange {
        line: usize,
        address: usize,
        len: usize,
        size: usize,
    },

    /// A memory size of zero or above the supported maximum
    #[error("Invalid memory size {size:#x}: must be between 1 and {max:#x} bytes")]
    InvalidSize { size: usize, max: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DumpError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        DumpError::MalformedLine {
            line,
            reason: reason.into(),
        }
    }

    /// The 1-based line number the error refers to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            DumpError::MalformedLine { line, .. } | DumpError::OutOfRange { line, .. } => {
                Some(*line)
            }
            DumpError::InvalidSize { .. } | DumpError::Io(_) => None,
        }
    }
}
