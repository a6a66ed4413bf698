//! Direct memory-mapped transport: every register transaction is a single
//! volatile load or store of exactly the register width.
use std::ptr;

use thiserror::Error;

use super::{
    bus::CsrBus,
    map::{CSRS_SPAN, CsrWidth},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MmioError {
    #[error("{bits}-bit access at 0x{address:X} falls outside the CSR window at 0x{base:X}")]
    OutsideWindow { address: usize, bits: u32, base: usize },
    #[error("{bits}-bit access at 0x{address:X} is misaligned")]
    Misaligned { address: usize, bits: u32 },
}

/// Volatile access to one CSR window in the current address space.
///
/// Native byte order. The window is fixed at construction; accesses that do
/// not fall inside it, aligned to their width, are rejected before any memory
/// is touched, so re-pointing an accessor elsewhere yields errors rather than
/// stray loads and stores.
#[derive(Debug)]
pub struct Mmio {
    base: usize,
}

impl Mmio {
    /// # Safety
    /// The `CSRS_SPAN` bytes starting at `base` must be mapped device memory or
    /// memory owned by the caller, valid for volatile 8/16/32-bit access for
    /// the lifetime of the transport. `base` must be aligned to 4 bytes.
    /// Nothing else may access the window while the transport is in use.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    pub fn base(&self) -> usize {
        self.base
    }

    fn check(&self, address: usize, width: CsrWidth) -> Result<(), MmioError> {
        let bits = width.bits();
        let inside = address
            .checked_sub(self.base)
            .is_some_and(|offset| offset <= CSRS_SPAN - width.bytes());
        if !inside {
            return Err(MmioError::OutsideWindow {
                address,
                bits,
                base: self.base,
            });
        }
        if address % width.bytes() != 0 {
            return Err(MmioError::Misaligned { address, bits });
        }
        Ok(())
    }
}

impl CsrBus for Mmio {
    type Error = MmioError;

    #[inline(always)]
    fn read(&mut self, address: usize, width: CsrWidth) -> Result<u32, MmioError> {
        self.check(address, width)?;
        // SAFETY: `check` keeps the access aligned and inside the window `new` vouched for.
        let value = unsafe {
            match width {
                CsrWidth::W8 => u32::from(ptr::read_volatile(address as *const u8)),
                CsrWidth::W16 => u32::from(ptr::read_volatile(address as *const u16)),
                CsrWidth::W32 => ptr::read_volatile(address as *const u32),
            }
        };
        Ok(value)
    }

    #[inline(always)]
    fn write(&mut self, address: usize, value: u32, width: CsrWidth) -> Result<(), MmioError> {
        self.check(address, width)?;
        // SAFETY: `check` keeps the access aligned and inside the window `new` vouched for.
        unsafe {
            match width {
                CsrWidth::W8 => ptr::write_volatile(address as *mut u8, value as u8),
                CsrWidth::W16 => ptr::write_volatile(address as *mut u16, value as u16),
                CsrWidth::W32 => ptr::write_volatile(address as *mut u32, value),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accesses_touch_exactly_the_register_width() {
        let mut window = [0u32; CSRS_SPAN / 4];
        let base = window.as_mut_ptr() as usize;
        // SAFETY: `window` is owned, aligned, spans the block and outlives the transport.
        let mut mmio = unsafe { Mmio::new(base) };

        mmio.write(base + 4, 0x1122_3344, CsrWidth::W32).expect("in window");
        mmio.write(base + 1, 0xABCD, CsrWidth::W8).expect("in window");
        assert_eq!(mmio.read(base + 1, CsrWidth::W8).expect("in window"), 0xCD);
        assert_eq!(mmio.read(base + 4, CsrWidth::W32).expect("in window"), 0x1122_3344);
        assert_eq!(mmio.read(base, CsrWidth::W8).expect("in window"), 0, "neighbours untouched");

        mmio.write(base + 2, 0xFFFF_BEEF, CsrWidth::W16).expect("in window");
        assert_eq!(mmio.read(base + 2, CsrWidth::W16).expect("in window"), 0xBEEF);
        assert_eq!(mmio.read(base + 4, CsrWidth::W32).expect("in window"), 0x1122_3344);
    }

    #[test]
    fn accesses_outside_the_window_are_rejected() {
        // never dereferenced: every access below fails the window check
        let base = 0x4000_0000;
        // SAFETY: no access reaches memory.
        let mut mmio = unsafe { Mmio::new(base) };

        assert_eq!(
            mmio.read(0x10, CsrWidth::W16),
            Err(MmioError::OutsideWindow { address: 0x10, bits: 16, base })
        );
        assert_eq!(
            mmio.read(base + CSRS_SPAN, CsrWidth::W8),
            Err(MmioError::OutsideWindow { address: base + CSRS_SPAN, bits: 8, base }),
            "window end is exclusive"
        );
        assert!(
            matches!(mmio.write(base + 30, 0, CsrWidth::W32), Err(MmioError::OutsideWindow { .. })),
            "a word straddling the window end is rejected"
        );
        assert_eq!(
            mmio.write(base + 5, 0, CsrWidth::W32),
            Err(MmioError::Misaligned { address: base + 5, bits: 32 })
        );
        assert!(mmio.read(usize::MAX, CsrWidth::W32).is_err(), "no overflow near the top");
    }
}
