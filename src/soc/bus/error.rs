use thiserror::Error;

use crate::soc::device::DeviceError;

pub type BusResult<T> = Result<T, BusError>;

#[derive(Debug, Error)]
pub enum BusError {
    #[error("address 0x{address:016X} is not mapped")]
    NotMapped { address: usize },
    #[error("address 0x{address:016X} overlaps existing mapping ({details})")]
    Overlap { address: usize, details: String },
    #[error("device '{device}' reported a fault")]
    DeviceFault {
        device: String,
        #[source]
        source: DeviceError,
    },
    #[error("a device named '{device}' is already mapped")]
    DuplicateName { device: String },
    #[error("device '{device}' reported an invalid span")]
    InvalidDeviceSpan { device: String },
    #[error("device '{device}' lock was poisoned")]
    LockPoisoned { device: String },
}
