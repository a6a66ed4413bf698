mod common;

use std::{fs, num::NonZeroU16};

use common::init_logging;
use iob_cache_csrs::{
    CacheCounters, HarnessConfig, HarnessError, SimHarness,
    harness::{ByteOrder, MODEL_NAME},
    soc::{
        csr::{CacheCsrs, map},
        device::{CacheCtrlModel, DEFAULT_VERSION},
        bus::DeviceBus,
    },
};

fn harness_at(base_address: usize) -> SimHarness {
    init_logging();
    let config = HarnessConfig {
        base_address,
        ..Default::default()
    };
    SimHarness::from_config(&config).expect("build harness")
}

fn drive_traffic(harness: &SimHarness) {
    let model = harness.model();
    let mut model = model.lock().expect("lock model");
    for hit in [true, true, false, true] {
        model.record_read(hit);
    }
    for hit in [false, true] {
        model.record_write(hit);
    }
}

#[test]
fn counters_reflect_cache_traffic() {
    let mut harness = harness_at(0x4000_0000);
    drive_traffic(&harness);

    let counters = harness.csrs().counters().expect("read counters");
    assert_eq!(
        counters,
        CacheCounters {
            rw_hit: 4,
            rw_miss: 2,
            read_hit: 3,
            read_miss: 1,
            write_hit: 1,
            write_miss: 1,
        }
    );
    assert_eq!(counters.read_hit_rate(), Some(0.75));
}

#[test]
fn reset_pulse_zeroes_every_counter() {
    let mut harness = harness_at(0x4000_0000);
    drive_traffic(&harness);

    let mut csrs = harness.csrs();
    csrs.set_rst_cntrs(1).expect("pulse RST_CNTRS");
    assert_eq!(csrs.get_rw_hit().expect("read"), 0);
    assert_eq!(csrs.get_rw_miss().expect("read"), 0);
    assert_eq!(csrs.get_read_hit().expect("read"), 0);
    assert_eq!(csrs.get_read_miss().expect("read"), 0);
    assert_eq!(csrs.get_write_hit().expect("read"), 0);
    assert_eq!(csrs.get_write_miss().expect("read"), 0);
    assert_eq!(harness.model().lock().expect("lock model").counter_resets(), 1);
}

#[test]
fn version_is_stable_and_non_zero() {
    let mut harness = harness_at(0x1000);
    let mut csrs = harness.csrs();
    let first = csrs.get_version().expect("read version");
    assert_ne!(first, 0, "hardware revision is never zero");
    for _ in 0..8 {
        assert_eq!(csrs.get_version().expect("read version"), first);
    }
    assert_eq!(first, DEFAULT_VERSION.get());
}

#[test]
fn invalidate_pulse_drops_valid_lines() {
    let mut harness = harness_at(0x2000);
    drive_traffic(&harness);
    assert_eq!(harness.model().lock().expect("lock model").valid_lines(), 1);

    harness.csrs().invalidate().expect("pulse INVALIDATE");
    let model = harness.model();
    let model = model.lock().expect("lock model");
    assert_eq!(model.valid_lines(), 0);
    assert_eq!(model.invalidations(), 1);
    assert_eq!(model.counters().read_miss, 1, "invalidation keeps the counters");
}

#[test]
fn zero_revision_never_reaches_the_model() {
    init_logging();
    let err = HarnessConfig::from_toml_str("base_address = 0x40000000\n[model]\nversion = 0\n")
        .expect_err("revision 0 is reserved");
    assert!(matches!(err, HarnessError::Parse(_)), "unexpected error: {err}");

    let config = HarnessConfig::from_toml_str("base_address = 0x40000000\n[model]\nversion = 1\n")
        .expect("revision 1 is valid");
    let mut harness = SimHarness::from_config(&config).expect("build harness");
    assert_eq!(harness.csrs().get_version().expect("read version"), 1);
}

#[test]
fn write_buffer_flags_follow_the_model() {
    let config = HarnessConfig::from_toml_str(
        r#"
        base_address = 0x3000
        [model]
        wtb_depth = 2
        "#,
    )
    .expect("config parses");
    let mut harness = SimHarness::from_config(&config).expect("build harness");

    {
        let mut csrs = harness.csrs();
        assert_eq!(csrs.get_wtb_empty().expect("read"), 1);
        assert_eq!(csrs.get_wtb_full().expect("read"), 0);
    }

    {
        let model = harness.model();
        let mut model = model.lock().expect("lock model");
        model.record_write(true);
        model.record_write(true);
    }
    let mut csrs = harness.csrs();
    assert_eq!(csrs.get_wtb_empty().expect("read"), 0);
    assert_eq!(csrs.get_wtb_full().expect("read"), 1);
}

#[test]
fn big_endian_harness_from_config_file() {
    let path = std::env::temp_dir().join(format!("iob_cache_csrs_{}.toml", std::process::id()));
    fs::write(
        &path,
        "base_address = 0x40000000\nendianness = \"big\"\n\n[model]\nversion = 0x0A0B\n",
    )
    .expect("write config");
    let config = HarnessConfig::load(&path).expect("load config");
    fs::remove_file(&path).ok();

    assert_eq!(config.endianness, ByteOrder::Big);
    let mut harness = SimHarness::from_config(&config).expect("build harness");
    assert_eq!(harness.csrs().get_version().expect("read version"), 0x0A0B);

    let mut raw = [0u8; 2];
    harness
        .bus_mut()
        .resolve(0x4000_0000 + map::VERSION.offset)
        .expect("resolve VERSION")
        .read(&mut raw)
        .expect("read raw bytes");
    assert_eq!(raw, [0x0A, 0x0B], "big-endian model stores the high byte first");
}

#[test]
fn two_controllers_on_one_bus() {
    init_logging();
    let mut bus = DeviceBus::new();
    let icache = std::sync::Arc::new(std::sync::Mutex::new(
        CacheCtrlModel::new("icache").with_version(NonZeroU16::MIN),
    ));
    let dcache = std::sync::Arc::new(std::sync::Mutex::new(
        CacheCtrlModel::new("dcache").with_version(DEFAULT_VERSION),
    ));
    bus.map_shared(icache.clone(), 0x1000).expect("map icache");
    bus.map_shared(dcache.clone(), 0x1020).expect("map dcache");
    assert!(bus.device_id(MODEL_NAME).is_none());

    icache.lock().expect("lock icache").record_read(true);

    let mut csrs = CacheCsrs::new(&mut bus, 0x1000);
    assert_eq!(csrs.get_version().expect("read icache"), 1);
    assert_eq!(csrs.get_read_hit().expect("read icache"), 1);
    csrs.set_rst_cntrs(1).expect("reset icache");

    csrs.init_base_address(0x1020);
    assert_eq!(csrs.get_version().expect("read dcache"), 2);
    assert_eq!(csrs.get_read_hit().expect("read dcache"), 0);

    assert_eq!(icache.lock().expect("lock icache").counter_resets(), 1);
    assert_eq!(dcache.lock().expect("lock dcache").counter_resets(), 0);
}
