//! Plain byte-addressable memory. Mapped in place of the cache controller it
//! acts as mock memory: every register location simply holds what was last
//! written to it.
use std::ops::Range;

use crate::soc::device::{Device, DeviceError, DeviceResult, Endianness};

pub struct RamMemory {
    name: String,
    bytes: Vec<u8>,
    endian: Endianness,
}

impl RamMemory {
    pub fn new(name: impl Into<String>, len: usize, endian: Endianness) -> Self {
        Self {
            name: name.into(),
            bytes: vec![0_u8; len],
            endian,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Raw backing store, for inspecting what a transaction left behind.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn check(&self, offset: usize, len: usize) -> DeviceResult<Range<usize>> {
        match offset.checked_add(len) {
            Some(end) if end <= self.bytes.len() => Ok(offset..end),
            _ => Err(DeviceError::OutOfRange {
                offset,
                len,
                capacity: self.bytes.len(),
            }),
        }
    }
}

impl Device for RamMemory {
    fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    fn span(&self) -> Range<usize> {
        0..self.len()
    }

    #[inline(always)]
    fn endianness(&self) -> Endianness {
        self.endian
    }

    fn read(&mut self, offset: usize, out: &mut [u8]) -> DeviceResult<()> {
        if out.is_empty() {
            return Ok(());
        }
        let range = self.check(offset, out.len())?;
        out.copy_from_slice(&self.bytes[range]);
        Ok(())
    }

    fn write(&mut self, offset: usize, data_in: &[u8]) -> DeviceResult<()> {
        if data_in.is_empty() {
            return Ok(());
        }
        let range = self.check(offset, data_in.len())?;
        self.bytes[range].copy_from_slice(data_in);
        Ok(())
    }
}
