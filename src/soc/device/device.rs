//! Defines the `Device` trait used by the simulated bus. Devices expose their
//! memory span and provide byte-level read/write with a consistent
//! `DeviceResult` error surface so bus code can translate failures into
//! `BusError::DeviceFault`.
use std::ops::Range;

use super::{endianness::Endianness, error::DeviceResult};

pub trait Device: Send {
    fn name(&self) -> &str;
    fn span(&self) -> Range<usize>;

    #[inline(always)]
    fn endianness(&self) -> Endianness {
        Endianness::Little
    }

    /// Read a contiguous slice of bytes from the device at `offset` into `out`.
    /// Reads may mutate if the device has side effects on read (clear bit on read)
    fn read(&mut self, offset: usize, out: &mut [u8]) -> DeviceResult<()>;

    /// Write a contiguous slice of bytes to the device at `offset` from `data`.
    fn write(&mut self, offset: usize, data: &[u8]) -> DeviceResult<()>;
}
