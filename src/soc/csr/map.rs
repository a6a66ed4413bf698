//! Register map of the cache controller's CSR block. The table is the single
//! source of offsets and widths for every transport.

/// Address bits decoded by the CSR block.
pub const CSRS_ADDR_W: u32 = 5;
/// Bytes occupied by the CSR block in the address space.
pub const CSRS_SPAN: usize = 1 << CSRS_ADDR_W;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CsrWidth {
    W8,
    W16,
    W32,
}

impl CsrWidth {
    pub const fn bits(self) -> u32 {
        match self {
            CsrWidth::W8 => 8,
            CsrWidth::W16 => 16,
            CsrWidth::W32 => 32,
        }
    }

    pub const fn bytes(self) -> usize {
        self.bits() as usize / 8
    }

    pub const fn mask(self) -> u32 {
        match self {
            CsrWidth::W32 => u32::MAX,
            _ => (1 << self.bits()) - 1,
        }
    }

    /// Natural integer truncation to the register width.
    #[inline(always)]
    pub const fn truncate(self, value: u32) -> u32 {
        value & self.mask()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CsrAccess {
    Read,
    Write,
}

impl CsrAccess {
    pub const fn is_readable(self) -> bool {
        matches!(self, CsrAccess::Read)
    }

    pub const fn is_writable(self) -> bool {
        matches!(self, CsrAccess::Write)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CsrRegister {
    pub name: &'static str,
    pub offset: usize,
    pub width: CsrWidth,
    pub access: CsrAccess,
}

impl CsrRegister {
    const fn new(name: &'static str, offset: usize, width: CsrWidth, access: CsrAccess) -> Self {
        Self {
            name,
            offset,
            width,
            access,
        }
    }

    /// Byte range covered by the register, relative to the block base.
    pub const fn span(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.width.bytes()
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.span().contains(&offset)
    }
}

/// Write-through buffer is empty.
pub const WTB_EMPTY: CsrRegister = CsrRegister::new("WTB_EMPTY", 0, CsrWidth::W8, CsrAccess::Read);
/// Write-through buffer is full.
pub const WTB_FULL: CsrRegister = CsrRegister::new("WTB_FULL", 1, CsrWidth::W8, CsrAccess::Read);
pub const RW_HIT: CsrRegister = CsrRegister::new("RW_HIT", 4, CsrWidth::W32, CsrAccess::Read);
pub const RW_MISS: CsrRegister = CsrRegister::new("RW_MISS", 8, CsrWidth::W32, CsrAccess::Read);
pub const READ_HIT: CsrRegister = CsrRegister::new("READ_HIT", 12, CsrWidth::W32, CsrAccess::Read);
pub const READ_MISS: CsrRegister = CsrRegister::new("READ_MISS", 16, CsrWidth::W32, CsrAccess::Read);
pub const WRITE_HIT: CsrRegister = CsrRegister::new("WRITE_HIT", 20, CsrWidth::W32, CsrAccess::Read);
pub const WRITE_MISS: CsrRegister =
    CsrRegister::new("WRITE_MISS", 24, CsrWidth::W32, CsrAccess::Read);
/// Any non-zero write clears the six hit/miss counters.
pub const RST_CNTRS: CsrRegister = CsrRegister::new("RST_CNTRS", 28, CsrWidth::W8, CsrAccess::Write);
/// Any non-zero write invalidates every cached line.
pub const INVALIDATE: CsrRegister =
    CsrRegister::new("INVALIDATE", 29, CsrWidth::W8, CsrAccess::Write);
/// Hardware revision.
pub const VERSION: CsrRegister = CsrRegister::new("VERSION", 30, CsrWidth::W16, CsrAccess::Read);

pub const REGISTER_MAP: [CsrRegister; 11] = [
    WTB_EMPTY, WTB_FULL, RW_HIT, RW_MISS, READ_HIT, READ_MISS, WRITE_HIT, WRITE_MISS, RST_CNTRS,
    INVALIDATE, VERSION,
];

/// The six hit/miss counters cleared by `RST_CNTRS`.
pub const COUNTERS: [CsrRegister; 6] = [RW_HIT, RW_MISS, READ_HIT, READ_MISS, WRITE_HIT, WRITE_MISS];

/// Case-insensitive lookup by register name.
pub fn lookup(name: &str) -> Option<&'static CsrRegister> {
    REGISTER_MAP
        .iter()
        .find(|reg| reg.name.eq_ignore_ascii_case(name))
}

/// Register covering `offset`, if any. Gaps in the map (offsets 2 and 3) have none.
pub fn register_at(offset: usize) -> Option<&'static CsrRegister> {
    REGISTER_MAP.iter().find(|reg| reg.contains(offset))
}
