//! Control/status register access for the IOb cache controller.
//!
//! `CacheCsrs` exposes one getter or setter per register and runs over any
//! [`CsrBus`](soc::csr::CsrBus): [`Mmio`](soc::csr::Mmio) for bare-metal
//! targets, or a simulated [`DeviceBus`](soc::bus::DeviceBus) with the
//! controller model mapped on it (see [`harness`]).
pub mod harness;
pub mod soc;

pub use harness::{HarnessConfig, HarnessError, SimHarness};
pub use soc::csr::{CacheCounters, CacheCsrs, CsrBus, Mmio, MmioError};
