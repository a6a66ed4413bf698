//! `CacheCsrs` translates register names into transactions on a `CsrBus`.
//!
//! The accessor holds the base address of the register window next to the
//! transport, so several controllers (or a controller and a mock) can be
//! driven side by side. Each call is one independent transaction; nothing is
//! cached between calls.
use log::trace;

use super::{
    bus::CsrBus,
    counters::CacheCounters,
    map::{self, CsrRegister},
    mmio::Mmio,
};

macro_rules! csr_getters {
    ($($(#[$doc:meta])* $name:ident => $reg:ident: $ty:ty;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(&mut self) -> Result<$ty, B::Error> {
                self.read_register(&map::$reg).map(|value| value as $ty)
            }
        )*
    };
}

macro_rules! csr_setters {
    ($($(#[$doc:meta])* $name:ident => $reg:ident: $ty:ty;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(&mut self, value: $ty) -> Result<(), B::Error> {
                self.write_register(&map::$reg, u32::from(value))
            }
        )*
    };
}

pub struct CacheCsrs<B> {
    bus: B,
    base: usize,
}

impl<B: CsrBus> CacheCsrs<B> {
    pub fn new(bus: B, base: usize) -> Self {
        Self { bus, base }
    }

    /// Point the accessor at the register window starting at `base`.
    pub fn init_base_address(&mut self, base: usize) {
        trace!("cache CSR base address set to 0x{base:X}");
        self.base = base;
    }

    pub fn base_address(&self) -> usize {
        self.base
    }

    pub fn register_address(&self, reg: &CsrRegister) -> usize {
        self.base.wrapping_add(reg.offset)
    }

    /// Raw read of any register, regardless of its access mode.
    pub fn read_register(&mut self, reg: &CsrRegister) -> Result<u32, B::Error> {
        let address = self.register_address(reg);
        let value = reg.width.truncate(self.bus.read(address, reg.width)?);
        trace!("{} @0x{address:X} -> 0x{value:X}", reg.name);
        Ok(value)
    }

    /// Raw write of any register, regardless of its access mode. `value` is
    /// truncated to the register width.
    pub fn write_register(&mut self, reg: &CsrRegister, value: u32) -> Result<(), B::Error> {
        let address = self.register_address(reg);
        let value = reg.width.truncate(value);
        trace!("{} @0x{address:X} <- 0x{value:X}", reg.name);
        self.bus.write(address, value, reg.width)
    }

    csr_getters! {
        /// Non-zero while the write-through buffer holds no pending writes.
        get_wtb_empty => WTB_EMPTY: u8;
        /// Non-zero while the write-through buffer cannot accept another write.
        get_wtb_full => WTB_FULL: u8;
        get_rw_hit => RW_HIT: u32;
        get_rw_miss => RW_MISS: u32;
        get_read_hit => READ_HIT: u32;
        get_read_miss => READ_MISS: u32;
        get_write_hit => WRITE_HIT: u32;
        get_write_miss => WRITE_MISS: u32;
        /// Hardware revision of the cache controller.
        get_version => VERSION: u16;
    }

    csr_setters! {
        /// A non-zero write clears every hit/miss counter.
        set_rst_cntrs => RST_CNTRS: u8;
        /// A non-zero write invalidates every cached line.
        set_invalidate => INVALIDATE: u8;
    }

    pub fn counters(&mut self) -> Result<CacheCounters, B::Error> {
        Ok(CacheCounters {
            rw_hit: self.get_rw_hit()?,
            rw_miss: self.get_rw_miss()?,
            read_hit: self.get_read_hit()?,
            read_miss: self.get_read_miss()?,
            write_hit: self.get_write_hit()?,
            write_miss: self.get_write_miss()?,
        })
    }

    pub fn reset_counters(&mut self) -> Result<(), B::Error> {
        self.set_rst_cntrs(1)
    }

    pub fn invalidate(&mut self) -> Result<(), B::Error> {
        self.set_invalidate(1)
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn into_bus(self) -> B {
        self.bus
    }
}

impl CacheCsrs<Mmio> {
    /// Accessor for the controller whose CSR window starts at `base`.
    ///
    /// # Safety
    /// Same contract as [`Mmio::new`].
    pub unsafe fn mmio(base: usize) -> Self {
        // SAFETY: forwarded to the caller.
        Self::new(unsafe { Mmio::new(base) }, base)
    }
}
