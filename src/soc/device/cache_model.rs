//! Behavioral model of the cache controller as seen through its CSR block.
//!
//! The model keeps only the state the registers expose: write-through buffer
//! occupancy, the six hit/miss counters, the number of valid lines and the
//! hardware revision. Test code drives cache traffic with `record_read` and
//! `record_write`, then observes it through the bus like software would.
use std::{num::NonZeroU16, ops::Range};

use log::{debug, warn};

use crate::soc::{
    csr::{
        CacheCounters,
        map::{self, CSRS_SPAN, CsrRegister, CsrWidth, REGISTER_MAP},
    },
    device::{Device, DeviceError, DeviceResult, Endianness},
};

/// Revision reported by `VERSION` unless configured otherwise.
pub const DEFAULT_VERSION: NonZeroU16 = match NonZeroU16::new(0x0002) {
    Some(version) => version,
    None => panic!("revision 0 is reserved"),
};
/// Entries in the write-through buffer unless configured otherwise.
pub const DEFAULT_WTB_DEPTH: usize = 4;
/// Cache lines that can hold valid data unless configured otherwise.
pub const DEFAULT_LINES: usize = 128;

pub struct CacheCtrlModel {
    name: String,
    endian: Endianness,
    version: NonZeroU16,
    wtb_depth: usize,
    wtb_level: usize,
    counters: CacheCounters,
    lines: usize,
    valid_lines: usize,
    invalidations: u64,
    counter_resets: u64,
}

impl CacheCtrlModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endian: Endianness::Little,
            version: DEFAULT_VERSION,
            wtb_depth: DEFAULT_WTB_DEPTH,
            wtb_level: 0,
            counters: CacheCounters::default(),
            lines: DEFAULT_LINES,
            valid_lines: 0,
            invalidations: 0,
            counter_resets: 0,
        }
    }

    pub fn with_version(mut self, version: NonZeroU16) -> Self {
        self.version = version;
        self
    }

    pub fn with_line_count(mut self, lines: usize) -> Self {
        self.lines = lines.max(1);
        self.valid_lines = self.valid_lines.min(self.lines);
        self
    }

    pub fn with_wtb_depth(mut self, depth: usize) -> Self {
        self.wtb_depth = depth.max(1);
        self
    }

    pub fn with_endianness(mut self, endian: Endianness) -> Self {
        self.endian = endian;
        self
    }

    /// A read access reached the cache. Misses fill a line until every line
    /// is valid; after that a miss evicts one.
    pub fn record_read(&mut self, hit: bool) {
        if hit {
            self.counters.read_hit = self.counters.read_hit.wrapping_add(1);
            self.counters.rw_hit = self.counters.rw_hit.wrapping_add(1);
        } else {
            self.counters.read_miss = self.counters.read_miss.wrapping_add(1);
            self.counters.rw_miss = self.counters.rw_miss.wrapping_add(1);
            self.valid_lines = self.valid_lines.saturating_add(1).min(self.lines);
        }
    }

    /// A write access reached the cache and was queued in the write-through buffer.
    pub fn record_write(&mut self, hit: bool) {
        if hit {
            self.counters.write_hit = self.counters.write_hit.wrapping_add(1);
            self.counters.rw_hit = self.counters.rw_hit.wrapping_add(1);
        } else {
            self.counters.write_miss = self.counters.write_miss.wrapping_add(1);
            self.counters.rw_miss = self.counters.rw_miss.wrapping_add(1);
        }
        self.wtb_level = (self.wtb_level + 1).min(self.wtb_depth);
    }

    /// Retire up to `entries` buffered writes to the backing memory.
    pub fn drain_write_buffer(&mut self, entries: usize) {
        self.wtb_level = self.wtb_level.saturating_sub(entries);
    }

    pub fn counters(&self) -> CacheCounters {
        self.counters
    }

    pub fn version(&self) -> NonZeroU16 {
        self.version
    }

    pub fn line_count(&self) -> usize {
        self.lines
    }

    pub fn wtb_level(&self) -> usize {
        self.wtb_level
    }

    pub fn valid_lines(&self) -> usize {
        self.valid_lines
    }

    pub fn invalidations(&self) -> u64 {
        self.invalidations
    }

    pub fn counter_resets(&self) -> u64 {
        self.counter_resets
    }

    fn register_value(&self, reg: &CsrRegister) -> u32 {
        let counters = &self.counters;
        match *reg {
            map::WTB_EMPTY => u32::from(self.wtb_level == 0),
            map::WTB_FULL => u32::from(self.wtb_level >= self.wtb_depth),
            map::RW_HIT => counters.rw_hit,
            map::RW_MISS => counters.rw_miss,
            map::READ_HIT => counters.read_hit,
            map::READ_MISS => counters.read_miss,
            map::WRITE_HIT => counters.write_hit,
            map::WRITE_MISS => counters.write_miss,
            map::VERSION => u32::from(self.version.get()),
            // pulse registers read back as zero
            map::RST_CNTRS | map::INVALIDATE => 0,
            _ => {
                warn!("{}: no model state behind {}", self.name, reg.name);
                0
            }
        }
    }

    fn image(&self) -> [u8; CSRS_SPAN] {
        let mut image = [0u8; CSRS_SPAN];
        for reg in REGISTER_MAP.iter().filter(|reg| reg.access.is_readable()) {
            let value = self.register_value(reg);
            let slot = &mut image[reg.span()];
            match reg.width {
                CsrWidth::W8 => slot[0] = value as u8,
                CsrWidth::W16 => slot.copy_from_slice(&self.endian.encode_u16(value as u16)),
                CsrWidth::W32 => slot.copy_from_slice(&self.endian.encode_u32(value)),
            }
        }
        image
    }

    fn pulse(&mut self, reg: &CsrRegister) {
        if *reg == map::RST_CNTRS {
            debug!("{}: hit/miss counters reset", self.name);
            self.counters = CacheCounters::default();
            self.counter_resets += 1;
        } else if *reg == map::INVALIDATE {
            debug!("{}: invalidating {} lines", self.name, self.valid_lines);
            self.valid_lines = 0;
            self.invalidations += 1;
        }
    }

    fn check(&self, offset: usize, len: usize) -> DeviceResult<Range<usize>> {
        match offset.checked_add(len) {
            Some(end) if end <= CSRS_SPAN => Ok(offset..end),
            _ => Err(DeviceError::OutOfRange {
                offset,
                len,
                capacity: CSRS_SPAN,
            }),
        }
    }
}

impl Device for CacheCtrlModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn span(&self) -> Range<usize> {
        0..CSRS_SPAN
    }

    fn endianness(&self) -> Endianness {
        self.endian
    }

    fn read(&mut self, offset: usize, out: &mut [u8]) -> DeviceResult<()> {
        let range = self.check(offset, out.len())?;
        out.copy_from_slice(&self.image()[range]);
        Ok(())
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> DeviceResult<()> {
        let range = self.check(offset, data.len())?;
        let mut pulsed: Vec<CsrRegister> = Vec::new();
        for (addr, byte) in range.zip(data.iter().copied()) {
            match map::register_at(addr) {
                Some(reg) if reg.access.is_writable() => {
                    if byte != 0 && !pulsed.contains(reg) {
                        pulsed.push(*reg);
                    }
                }
                Some(reg) => {
                    warn!("{}: ignoring write to read-only {}", self.name, reg.name)
                }
                None => warn!("{}: ignoring write to unmapped offset 0x{addr:02X}", self.name),
            }
        }
        for reg in &pulsed {
            self.pulse(reg);
        }
        Ok(())
    }
}
