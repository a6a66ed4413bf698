//! Simulation harness: a `DeviceBus` with the cache controller model mapped
//! where the configuration says, ready to be driven through `CacheCsrs`.
//!
//! ```toml
//! base_address = 0x40000000
//! endianness = "little"
//!
//! [model]
//! version = 2
//! wtb_depth = 4
//! lines = 128
//! ```
use std::{
    fs,
    num::NonZeroU16,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use log::info;
use serde::Deserialize;
use thiserror::Error;

use crate::soc::{
    bus::{BusError, DeviceBus},
    csr::CacheCsrs,
    device::{CacheCtrlModel, DEFAULT_LINES, DEFAULT_VERSION, DEFAULT_WTB_DEPTH, Endianness},
};

pub const MODEL_NAME: &str = "iob_cache";

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid harness config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to map the cache controller: {0}")]
    Bus(#[from] BusError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

impl From<ByteOrder> for Endianness {
    fn from(order: ByteOrder) -> Self {
        match order {
            ByteOrder::Little => Endianness::Little,
            ByteOrder::Big => Endianness::Big,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Hardware revision; zero is rejected at parse time.
    pub version: NonZeroU16,
    pub wtb_depth: usize,
    pub lines: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION,
            wtb_depth: DEFAULT_WTB_DEPTH,
            lines: DEFAULT_LINES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    pub base_address: usize,
    pub endianness: ByteOrder,
    pub model: ModelConfig,
}

impl HarnessConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, HarnessError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, HarnessError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| HarnessError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

pub struct SimHarness {
    bus: DeviceBus,
    model: Arc<Mutex<CacheCtrlModel>>,
    base: usize,
}

impl SimHarness {
    pub fn from_config(config: &HarnessConfig) -> Result<Self, HarnessError> {
        let model = CacheCtrlModel::new(MODEL_NAME)
            .with_version(config.model.version)
            .with_wtb_depth(config.model.wtb_depth)
            .with_line_count(config.model.lines)
            .with_endianness(config.endianness.into());
        let model = Arc::new(Mutex::new(model));

        let mut bus = DeviceBus::new();
        bus.map_shared(model.clone(), config.base_address)?;
        info!(
            "cache controller model mapped at 0x{:X} ({:?}, version 0x{:04X})",
            config.base_address, config.endianness, config.model.version.get()
        );
        Ok(Self {
            bus,
            model,
            base: config.base_address,
        })
    }

    /// Register accessor over this harness's bus.
    pub fn csrs(&mut self) -> CacheCsrs<&mut DeviceBus> {
        CacheCsrs::new(&mut self.bus, self.base)
    }

    /// Typed handle to the model, for driving cache traffic directly.
    pub fn model(&self) -> Arc<Mutex<CacheCtrlModel>> {
        self.model.clone()
    }

    pub fn bus_mut(&mut self) -> &mut DeviceBus {
        &mut self.bus
    }

    pub fn base_address(&self) -> usize {
        self.base
    }
}
