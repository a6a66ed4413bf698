//! Simulated transport: register transactions are routed over a `DeviceBus`
//! to whatever device is mapped at the address, in that device's byte order.
use crate::soc::bus::{BusError, DataView, DeviceBus};

use super::{bus::CsrBus, map::CsrWidth};

impl CsrBus for DeviceBus {
    type Error = BusError;

    fn read(&mut self, address: usize, width: CsrWidth) -> Result<u32, BusError> {
        let mut view = DataView::new(self.resolve(address)?);
        match width {
            CsrWidth::W8 => view.read_u8().map(u32::from),
            CsrWidth::W16 => view.read_u16().map(u32::from),
            CsrWidth::W32 => view.read_u32(),
        }
    }

    fn write(&mut self, address: usize, value: u32, width: CsrWidth) -> Result<(), BusError> {
        let mut view = DataView::new(self.resolve(address)?);
        match width {
            CsrWidth::W8 => view.write_u8(value as u8),
            CsrWidth::W16 => view.write_u16(value as u16),
            CsrWidth::W32 => view.write_u32(value),
        }
    }
}
