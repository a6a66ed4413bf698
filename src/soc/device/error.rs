use thiserror::Error;

pub type DeviceResult<T> = Result<T, DeviceError>;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("access of {len} bytes at offset 0x{offset:X} exceeds device capacity 0x{capacity:X}")]
    OutOfRange {
        offset: usize,
        len: usize,
        capacity: usize,
    },
}
