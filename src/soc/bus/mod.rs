//! Simulated interconnect. Devices are mapped into a flat address space and
//! reached through handles resolved per access.
pub mod data;
pub mod device_bus;
pub mod error;
pub mod handle;
pub mod range;

pub use data::DataView;
pub use device_bus::{DeviceBus, DeviceId, DeviceRef};
pub use error::{BusError, BusResult};
pub use handle::DeviceHandle;
