use std::ops::Range;

/// One device mapping on the bus, keyed by `bus_start` in the memory map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusRange {
    pub bus_start: usize,
    pub bus_end: usize,
    pub device_offset: usize,
    pub device_id: usize,
}

impl BusRange {
    pub fn contains(&self, addr: usize) -> bool {
        self.bus_start <= addr && addr < self.bus_end
    }

    pub fn overlaps(&self, other: &Range<usize>) -> bool {
        self.bus_start < other.end && other.start < self.bus_end
    }

    pub fn len(&self) -> usize {
        self.bus_end - self.bus_start
    }

    pub fn is_empty(&self) -> bool {
        self.bus_start == self.bus_end
    }
}
