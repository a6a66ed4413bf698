//! Devices that can be mapped onto the simulated interconnect: the `Device`
//! trait, plain RAM used as mock memory, and the behavioral model of the cache
//! controller's register block.
#[path = "device.rs"]
mod device_trait;
pub mod cache_model;
pub mod endianness;
pub mod error;
pub mod ram;

pub use cache_model::{CacheCtrlModel, DEFAULT_LINES, DEFAULT_VERSION, DEFAULT_WTB_DEPTH};
pub use device_trait::Device;
pub use endianness::Endianness;
pub use error::{DeviceError, DeviceResult};
pub use ram::RamMemory;
