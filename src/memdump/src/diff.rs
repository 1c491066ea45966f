//! Byte-range differencing between a reference image and a test image.
//!
//! A single left-to-right scan coalesces runs of differing bytes into
//! maximal half-open ranges. A range is only closed when a matching byte
//! follows it, so by default a run that reaches the end of the compared
//! region is never reported. [`DiffRanges::flush_trailing`] opts into
//! reporting that final run too.

use std::fmt;
use std::io::{self, Write};
use std::ops::Range;

/// Bytes per `A`/`B` row in a range report
pub const BYTES_PER_ROW: usize = 16;

/// Half-open interval `[start, end)` where reference and test disagree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffRange {
    pub start: usize,
    pub end: usize,
}

impl DiffRange {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Address of the final differing byte, `None` for an empty range
    pub fn last(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.end - 1)
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Reference and test images whose declared lengths differ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthMismatch {
    pub reference: usize,
    pub test: usize,
}

impl fmt::Display for LengthMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Banks are of a different size ({:#x} vs {:#x} bytes), comparing the first {:#x}",
            self.reference,
            self.test,
            self.reference.min(self.test)
        )
    }
}

/// A reference/test pair ready to be scanned
#[derive(Debug, Clone, Copy)]
pub struct Comparison<'a> {
    reference: &'a [u8],
    test: &'a [u8],
}

impl<'a> Comparison<'a> {
    pub fn new(reference: &'a [u8], test: &'a [u8]) -> Self {
        Comparison { reference, test }
    }

    /// `Some` when the two images differ in length
    pub fn mismatch(&self) -> Option<LengthMismatch> {
        (self.reference.len() != self.test.len()).then(|| LengthMismatch {
            reference: self.reference.len(),
            test: self.test.len(),
        })
    }

    /// Number of bytes actually compared
    pub fn limit(&self) -> usize {
        self.reference.len().min(self.test.len())
    }

    pub fn reference(&self) -> &'a [u8] {
        self.reference
    }

    pub fn test(&self) -> &'a [u8] {
        self.test
    }

    /// Lazily scan for differing ranges
    pub fn ranges(&self) -> DiffRanges<'a> {
        let (reference, test) = (self.reference, self.test);
        let limit = self.limit();
        DiffRanges {
            reference: &reference[..limit],
            test: &test[..limit],
            range_start: 0,
            scan_pos: 0,
            flush_trailing: false,
            finished: false,
        }
    }

    /// Report block for one range of this comparison.
    ///
    /// `None` if the range is empty or runs past either image.
    pub fn report(&self, range: DiffRange) -> Option<RangeReport<'a>> {
        if range.is_empty() {
            return None;
        }

        let (reference, test) = (self.reference, self.test);
        Some(RangeReport {
            range,
            reference: reference.get(range.as_range())?,
            test: test.get(range.as_range())?,
        })
    }

    /// Write a report block for every range, returning how many were written
    pub fn write_report<W: Write>(&self, mut out: W, flush_trailing: bool) -> io::Result<usize> {
        let mut count = 0;
        for range in self.ranges().flush_trailing(flush_trailing) {
            if let Some(report) = self.report(range) {
                write!(out, "{}", report)?;
                count += 1;
            }
        }
        Ok(count)
    }
}

/// Iterator over maximal differing ranges, in address order
#[derive(Debug, Clone)]
pub struct DiffRanges<'a> {
    reference: &'a [u8],
    test: &'a [u8],
    range_start: usize,
    scan_pos: usize,
    flush_trailing: bool,
    finished: bool,
}

impl DiffRanges<'_> {
    /// Also yield a differing run that is still open when the scan ends
    pub fn flush_trailing(mut self, flush: bool) -> Self {
        self.flush_trailing = flush;
        self
    }

    /// The run left open at the end of the scan, if the scan is finished
    pub fn pending(&self) -> Option<DiffRange> {
        let done = self.scan_pos == self.reference.len();
        (done && self.range_start != self.scan_pos).then_some(DiffRange {
            start: self.range_start,
            end: self.scan_pos,
        })
    }
}

impl Iterator for DiffRanges<'_> {
    type Item = DiffRange;

    fn next(&mut self) -> Option<DiffRange> {
        let limit = self.reference.len();

        while self.scan_pos < limit {
            let pos = self.scan_pos;
            self.scan_pos += 1;

            if self.reference[pos] == self.test[pos] {
                let start = self.range_start;
                self.range_start = self.scan_pos;
                if start != pos {
                    return Some(DiffRange { start, end: pos });
                }
            }
        }

        if self.finished || self.range_start == limit {
            return None;
        }
        self.finished = true;

        let pending = DiffRange {
            start: self.range_start,
            end: limit,
        };
        if self.flush_trailing {
            self.range_start = limit;
            return Some(pending);
        }

        tracing::debug!(
            start = pending.start,
            end = pending.end,
            "differing run reaches end of compared region, not reported"
        );
        None
    }
}

/// Human-readable block for one range:
///
/// ```text
/// $0010 to $0012
/// A $0010: 01 02 03
/// B $0010: FF FF FF
///
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RangeReport<'a> {
    range: DiffRange,
    reference: &'a [u8],
    test: &'a [u8],
}

impl fmt::Display for RangeReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only built from non-empty ranges
        writeln!(f, "${:04X} to ${:04X}", self.range.start, self.range.end - 1)?;

        let rows = self
            .reference
            .chunks(BYTES_PER_ROW)
            .zip(self.test.chunks(BYTES_PER_ROW));
        for (row, (a, b)) in rows.enumerate() {
            let address = self.range.start + row * BYTES_PER_ROW;
            writeln!(f, "A ${:04X}: {}", address, hex_row(a))?;
            writeln!(f, "B ${:04X}: {}", address, hex_row(b))?;
        }

        writeln!(f)
    }
}

fn hex_row(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
