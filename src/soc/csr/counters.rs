/// Snapshot of the six hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheCounters {
    pub rw_hit: u32,
    pub rw_miss: u32,
    pub read_hit: u32,
    pub read_miss: u32,
    pub write_hit: u32,
    pub write_miss: u32,
}

impl CacheCounters {
    pub fn accesses(&self) -> u64 {
        u64::from(self.rw_hit) + u64::from(self.rw_miss)
    }

    /// Fraction of all accesses that hit, `None` before the first access.
    pub fn hit_rate(&self) -> Option<f64> {
        ratio(self.rw_hit, self.rw_miss)
    }

    pub fn read_hit_rate(&self) -> Option<f64> {
        ratio(self.read_hit, self.read_miss)
    }

    pub fn write_hit_rate(&self) -> Option<f64> {
        ratio(self.write_hit, self.write_miss)
    }
}

fn ratio(hits: u32, misses: u32) -> Option<f64> {
    let total = u64::from(hits) + u64::from(misses);
    (total != 0).then(|| hits as f64 / total as f64)
}
