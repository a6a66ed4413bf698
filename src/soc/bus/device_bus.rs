//! DeviceBus owns the simulated memory map: device registration, ordered
//! address lookup, and name lookup so consumers get deterministic
//! address-to-device resolution. Mappings may not overlap.
use std::{
    collections::BTreeMap,
    ops::Range,
    sync::{Arc, Mutex},
};

use ahash::AHashMap;
use log::debug;

use crate::soc::{bus::DeviceHandle, device::Device};

use super::{
    error::{BusError, BusResult},
    range::BusRange,
};

pub type DeviceRef = Arc<Mutex<dyn Device>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeviceId(usize);

impl DeviceId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Implement the device bus, owning device registrations and address mappings
pub struct DeviceBus {
    // Indexed by ID; unmapped slots stay empty so IDs are never reused
    devices: Vec<Option<DeviceRef>>,
    names: AHashMap<String, DeviceId>,
    // Key: start address
    map: BTreeMap<usize, BusRange>,
}

impl Default for DeviceBus {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceBus {
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            names: AHashMap::new(),
            map: BTreeMap::new(),
        }
    }

    pub fn map_device(&mut self, device: impl Device + 'static, address: usize) -> BusResult<DeviceId> {
        self.map_shared(Arc::new(Mutex::new(device)), address)
    }

    /// Map a device the caller keeps a typed handle to, so it can drive or
    /// inspect the device directly while software reaches it over the bus.
    pub fn map_shared<D: Device + 'static>(
        &mut self,
        device: Arc<Mutex<D>>,
        address: usize,
    ) -> BusResult<DeviceId> {
        let (name, span) = {
            let dev = device.lock().map_err(|_| BusError::LockPoisoned {
                device: "unknown".into(),
            })?;
            (dev.name().to_string(), dev.span())
        };
        if span.is_empty() {
            return Err(BusError::InvalidDeviceSpan { device: name });
        }
        if self.names.contains_key(&name) {
            return Err(BusError::DuplicateName { device: name });
        }
        let bus_end = address
            .checked_add(span.len())
            .ok_or_else(|| BusError::InvalidDeviceSpan { device: name.clone() })?;

        if let Some(existing) = self.first_overlap(&(address..bus_end)) {
            return Err(BusError::Overlap {
                address,
                details: format!(
                    "0x{:X}..0x{:X} already mapped",
                    existing.bus_start, existing.bus_end
                ),
            });
        }

        let device: DeviceRef = device;
        self.devices.push(Some(device));
        let device_id = DeviceId(self.devices.len() - 1);
        self.names.insert(name.clone(), device_id);
        self.map.insert(
            address,
            BusRange {
                bus_start: address,
                bus_end,
                device_offset: span.start,
                device_id: device_id.0,
            },
        );
        debug!("mapped '{name}' at 0x{address:X}..0x{bus_end:X}");
        Ok(device_id)
    }

    pub fn resolve(&self, address: usize) -> BusResult<DeviceHandle> {
        let range = self
            .range_for_address(address)
            .ok_or(BusError::NotMapped { address })?;
        let device = self
            .device(DeviceId(range.device_id))
            .ok_or(BusError::NotMapped { address })?;
        DeviceHandle::new(device, (address - range.bus_start) + range.device_offset)
    }

    pub fn unmap(&mut self, address: usize) -> BusResult<()> {
        let key = self
            .range_for_address(address)
            .map(|range| range.bus_start)
            .ok_or(BusError::NotMapped { address })?;
        if let Some(range) = self.map.remove(&key) {
            let id = DeviceId(range.device_id);
            self.names.retain(|_, mapped| *mapped != id);
            if let Some(slot) = self.devices.get_mut(id.0) {
                *slot = None;
            }
            debug!("unmapped 0x{:X}..0x{:X}", range.bus_start, range.bus_end);
        }
        Ok(())
    }

    /// The device behind `id`, or `None` once it has been unmapped.
    pub fn device(&self, id: DeviceId) -> Option<DeviceRef> {
        self.devices.get(id.0).and_then(Option::clone)
    }

    pub fn device_id(&self, name: &str) -> Option<DeviceId> {
        self.names.get(name).copied()
    }

    pub fn mappings(&self) -> impl Iterator<Item = &BusRange> {
        self.map.values()
    }
}

impl DeviceBus {
    fn range_for_address(&self, address: usize) -> Option<&BusRange> {
        self.map
            .range(..=address)
            .next_back()
            .map(|(_, range)| range)
            .filter(|range| range.contains(address))
    }

    fn first_overlap(&self, span: &Range<usize>) -> Option<&BusRange> {
        self.map
            .range(..span.end)
            .next_back()
            .map(|(_, range)| range)
            .filter(|range| range.overlaps(span))
    }
}
