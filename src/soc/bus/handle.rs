//! DeviceHandle wraps a resolved bus mapping and keeps a cursor into the
//! device, so a caller can issue one or more transfers starting at the
//! resolved address without going back through the `DeviceBus` map.
//!
//! Every transfer advances the cursor by the number of bytes moved. Device
//! failures come back as `BusError::DeviceFault` tagged with the device name.
use std::sync::MutexGuard;

use crate::soc::{
    bus::DeviceRef,
    device::{Device, Endianness},
};

use super::error::{BusError, BusResult};

pub struct DeviceHandle {
    device: DeviceRef,
    name: String,
    endian: Endianness,
    offset: usize,
    size: usize,
}

impl DeviceHandle {
    pub fn new(device: DeviceRef, offset: usize) -> BusResult<Self> {
        let (name, size, endian) = {
            let dev = device.lock().map_err(|_| BusError::LockPoisoned {
                device: "unknown".into(),
            })?;
            (dev.name().to_string(), dev.span().len(), dev.endianness())
        };
        Ok(Self {
            device,
            name,
            endian,
            offset,
            size,
        })
    }

    pub fn read(&mut self, out: &mut [u8]) -> BusResult<()> {
        let offset = self.offset;
        self.lock()?
            .read(offset, out)
            .map_err(|source| BusError::DeviceFault {
                device: self.name.clone(),
                source,
            })?;
        self.offset = self.offset.saturating_add(out.len());
        Ok(())
    }

    pub fn write(&mut self, data: &[u8]) -> BusResult<()> {
        let offset = self.offset;
        self.lock()?
            .write(offset, data)
            .map_err(|source| BusError::DeviceFault {
                device: self.name.clone(),
                source,
            })?;
        self.offset = self.offset.saturating_add(data.len());
        Ok(())
    }

    #[inline(always)]
    pub fn get_position(&self) -> usize {
        self.offset
    }

    #[inline(always)]
    pub fn get_remaining(&self) -> usize {
        self.size.saturating_sub(self.offset)
    }

    #[inline(always)]
    pub fn get_endianness(&self) -> Endianness {
        self.endian
    }

    #[inline(always)]
    pub fn get_device_name(&self) -> &str {
        &self.name
    }

    fn lock(&self) -> BusResult<MutexGuard<'_, dyn Device + 'static>> {
        self.device.lock().map_err(|_| BusError::LockPoisoned {
            device: self.name.clone(),
        })
    }
}
