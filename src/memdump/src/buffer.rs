//! Fixed-size memory image.

use crate::DumpError;

/// Size of a full 16-bit address space
pub const MEMORY_SIZE: usize = 0x10000;

/// Largest memory image a dump may be loaded into (16 MiB)
pub const MAX_MEMORY_SIZE: usize = 0x100_0000;

/// Check a requested buffer size against [`MAX_MEMORY_SIZE`]
pub fn check_memory_size(size: usize) -> Result<usize, DumpError> {
    if size == 0 || size > MAX_MEMORY_SIZE {
        return Err(DumpError::InvalidSize {
            size,
            max: MAX_MEMORY_SIZE,
        });
    }
    Ok(size)
}

/// Zero-initialized byte image indexed by address.
///
/// Writes only happen while a dump is being loaded; callers get read-only
/// access afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryBuffer {
    bytes: Vec<u8>,
}

impl MemoryBuffer {
    /// Create a zeroed buffer of `size` bytes
    pub fn new(size: usize) -> Self {
        MemoryBuffer {
            bytes: vec![0; size],
        }
    }

    /// Wrap an existing raw image (e.g. a `.bin` file) without copying
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        MemoryBuffer { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bytes in `[address, address + len)`, or `None` if that leaves the buffer
    pub fn get(&self, address: usize, len: usize) -> Option<&[u8]> {
        let end = address.checked_add(len)?;
        self.bytes.get(address..end)
    }

    /// Write `data` starting at `address`, last byte first.
    ///
    /// The whole run is bounds-checked before anything is written, so a
    /// failing line leaves the buffer untouched.
    pub(crate) fn write(
        &mut self,
        address: usize,
        data: &[u8],
        line: usize,
    ) -> Result<(), DumpError> {
        let out_of_range = || DumpError::OutOfRange {
            line,
            address,
            len: data.len(),
            size: self.bytes.len(),
        };

        let end = address.checked_add(data.len()).ok_or_else(out_of_range)?;
        if end > self.bytes.len() {
            return Err(out_of_range());
        }

        for (offset, &byte) in data.iter().enumerate().rev() {
            self.bytes[address + offset] = byte;
        }

        Ok(())
    }
}

impl Default for MemoryBuffer {
    fn default() -> Self {
        MemoryBuffer::new(MEMORY_SIZE)
    }
}

impl AsRef<[u8]> for MemoryBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
