#![allow(dead_code)]

use std::convert::Infallible;

use iob_cache_csrs::soc::csr::{CSRS_SPAN, CsrBus, CsrWidth};

/// Route `log` output through the test harness. Set `RUST_LOG=trace` to see
/// every register transaction.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Transport that answers every read with zero and records what was asked of it.
#[derive(Default)]
pub struct RecordingBus {
    pub reads: Vec<(usize, CsrWidth)>,
    pub writes: Vec<(usize, u32, CsrWidth)>,
}

impl CsrBus for RecordingBus {
    type Error = Infallible;

    fn read(&mut self, address: usize, width: CsrWidth) -> Result<u32, Infallible> {
        self.reads.push((address, width));
        Ok(0)
    }

    fn write(&mut self, address: usize, value: u32, width: CsrWidth) -> Result<(), Infallible> {
        self.writes.push((address, value, width));
        Ok(())
    }
}

/// Word-aligned heap memory standing in for a device window in `Mmio` tests.
pub struct MmioWindow {
    words: Box<[u32; CSRS_SPAN / 4]>,
}

impl MmioWindow {
    pub fn new() -> Self {
        Self {
            words: Box::new([0; CSRS_SPAN / 4]),
        }
    }

    pub fn base(&mut self) -> usize {
        self.words.as_mut_ptr() as usize
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.words.iter().flat_map(|word| word.to_ne_bytes()).collect()
    }
}
