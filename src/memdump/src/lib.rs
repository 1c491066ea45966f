//! # memdump
//!
//! Tools for `ADDRESS:HEXBYTES` memory dumps written by emulators and
//! hardware test harnesses.
//!
//! This library provides functionality to:
//! - Load a dump into a fixed-size memory image
//! - Diff a reference image against a test image, range by range
//! - Flatten dumps into a raw byte stream
//!
//! ## Example
//!
//! ```
//! use memdump::{parse_dump, Comparison, MEMORY_SIZE};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let reference = parse_dump("1000:A9008D\n", MEMORY_SIZE)?;
//! let test = parse_dump("1000:A9FF8D\n", MEMORY_SIZE)?;
//!
//! let comparison = Comparison::new(reference.as_bytes(), test.as_bytes());
//! let ranges: Vec<_> = comparison.ranges().collect();
//!
//! assert_eq!(ranges.len(), 1);
//! assert_eq!((ranges[0].start, ranges[0].end), (0x1001, 0x1002));
//! if let Some(report) = comparison.report(ranges[0]) {
//!     print!("{}", report);
//! }
//! # Ok(())
//! # }
//! ```

pub mod buffer;
pub mod concat;
pub mod diff;
pub mod dump;
pub mod error;

#[doc(inline)]
pub use buffer::{check_memory_size, MemoryBuffer, MAX_MEMORY_SIZE, MEMORY_SIZE};
#[doc(inline)]
pub use concat::{append_dump, decode_dump};
#[doc(inline)]
pub use diff::{Comparison, DiffRange, DiffRanges, LengthMismatch, RangeReport};
#[doc(inline)]
pub use dump::{parse_dump, read_dump, DumpLine};
#[doc(inline)]
pub use error::DumpError;
