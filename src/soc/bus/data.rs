//! Scalar access layered on DeviceHandle. Values are decoded and encoded in
//! the byte order of the device behind the handle.
use super::{error::BusResult, handle::DeviceHandle};

pub struct DataView {
    handle: DeviceHandle,
}

impl DataView {
    pub fn new(handle: DeviceHandle) -> Self {
        Self { handle }
    }

    #[inline(always)]
    pub fn read(&mut self, out: &mut [u8]) -> BusResult<()> {
        self.handle.read(out)
    }

    #[inline(always)]
    pub fn write(&mut self, data: &[u8]) -> BusResult<()> {
        self.handle.write(data)
    }

    pub fn read_u8(&mut self) -> BusResult<u8> {
        let mut buf = [0u8; 1];
        self.read(&mut buf)?;
        Ok(buf[0])
    }

    pub fn read_u16(&mut self) -> BusResult<u16> {
        let mut buf = [0u8; 2];
        self.read(&mut buf)?;
        Ok(self.handle.get_endianness().decode_u16(buf))
    }

    pub fn read_u32(&mut self) -> BusResult<u32> {
        let mut buf = [0u8; 4];
        self.read(&mut buf)?;
        Ok(self.handle.get_endianness().decode_u32(buf))
    }

    pub fn read_u64(&mut self) -> BusResult<u64> {
        let mut buf = [0u8; 8];
        self.read(&mut buf)?;
        Ok(self.handle.get_endianness().decode_u64(buf))
    }

    pub fn write_u8(&mut self, value: u8) -> BusResult<()> {
        self.write(&[value])
    }

    pub fn write_u16(&mut self, value: u16) -> BusResult<()> {
        let buf = self.handle.get_endianness().encode_u16(value);
        self.write(&buf)
    }

    pub fn write_u32(&mut self, value: u32) -> BusResult<()> {
        let buf = self.handle.get_endianness().encode_u32(value);
        self.write(&buf)
    }

    pub fn write_u64(&mut self, value: u64) -> BusResult<()> {
        let buf = self.handle.get_endianness().encode_u64(value);
        self.write(&buf)
    }

    pub fn get_handle(&self) -> &DeviceHandle {
        &self.handle
    }
}
