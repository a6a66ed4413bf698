//! Register accessor for the cache controller's CSR block, and the transports
//! it runs over.
pub mod accessor;
pub mod bus;
pub mod counters;
pub mod map;
pub mod mmio;
pub mod sim;

pub use accessor::CacheCsrs;
pub use bus::CsrBus;
pub use counters::CacheCounters;
pub use map::{CSRS_ADDR_W, CSRS_SPAN, CsrAccess, CsrRegister, CsrWidth, REGISTER_MAP};
pub use mmio::{Mmio, MmioError};
