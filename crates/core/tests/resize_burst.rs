mod common;

use std::time::Duration;

use common::{FakeHost, Harness};
use gridfeed_core::{Capacity, GridConfig};

#[test]
fn test_single_resize_recalculates_after_quiet_period() {
    let mut harness = Harness::mounted();
    let writes_before = harness.host.height_writes.len();

    harness.resize(900.0, 600.0);
    harness.advance_ms(499);
    assert_eq!(harness.host.height_writes.len(), writes_before);

    harness.advance_ms(1);
    assert_eq!(harness.host.height_writes.len(), writes_before + 1);
    assert_eq!(harness.host.height_writes.last(), Some(&560.0));
    // (900 - 3) / 18 = 49.8, (560 - 3) / 18 = 30.9
    assert_eq!(harness.grid.capacity(), Capacity::new(49, 30));
}

#[test]
fn test_burst_yields_exactly_one_recalculation() {
    let mut harness = Harness::mounted();
    let writes_before = harness.host.height_writes.len();
    let burst_start = harness.host.clock;

    // 30 events, 100ms apart: the burst lasts 2.9s
    for step in 0..30 {
        harness.resize(700.0 + f64::from(step), 600.0);
        harness.advance_ms(100);
    }
    let last_event = burst_start + Duration::from_millis(2900);
    assert_eq!(harness.host.height_writes.len(), writes_before);

    harness.advance_ms(399);
    assert_eq!(harness.host.height_writes.len(), writes_before);
    assert!(harness.host.clock < last_event + Duration::from_millis(500));

    harness.advance_ms(1);
    assert_eq!(harness.host.height_writes.len(), writes_before + 1);

    harness.advance_ms(5000);
    assert_eq!(harness.host.height_writes.len(), writes_before + 1);
    // Last value wins: width 729 -> (729 - 3) / 18 = 40.3
    assert_eq!(harness.grid.capacity().columns, 40);
}

#[test]
fn test_separate_bursts_each_recalculate() {
    let mut harness = Harness::mounted();
    let writes_before = harness.host.height_writes.len();

    harness.resize(800.0, 700.0);
    harness.advance_ms(600);
    harness.resize(600.0, 500.0);
    harness.advance_ms(600);

    assert_eq!(harness.host.height_writes.len(), writes_before + 2);
    assert_eq!(harness.host.height_writes.last(), Some(&460.0));
}

#[test]
fn test_resize_does_not_touch_feed() {
    let mut harness = Harness::mounted();
    let len = harness.grid.feed().len();

    harness.resize(400.0, 400.0);
    harness.advance_ms(1000);

    assert_eq!(harness.grid.feed().len(), len);
    assert!(!harness.grid.is_loading());
}

#[test]
fn test_early_timer_still_recalculates() {
    let mut harness = Harness::mounted();
    let writes_before = harness.host.height_writes.len();

    harness.host.early_once = Some(Duration::from_micros(50));
    harness.resize(900.0, 600.0);
    harness.advance_ms(10_000);

    assert_eq!(harness.host.height_writes.len(), writes_before + 1);
    assert_eq!(harness.grid.capacity(), Capacity::new(49, 30));
}

#[test]
fn test_whole_millisecond_timers_deliver_throttled_burst() {
    let mut config = GridConfig::default();
    config.resize.throttle_ms = 2000;
    let mut harness = Harness::with_config(FakeHost::new(738.0, 800.0, 40.0), config);
    harness.host.whole_ms_timers = true;
    harness.grid.mount(&mut harness.host);
    harness.advance_ms(1000);
    let writes_before = harness.host.height_writes.len();

    // Off-millisecond event times make the throttled wait fractional
    harness.advance(Duration::from_micros(300));
    harness.resize(800.0, 700.0);
    harness.advance(Duration::from_micros(700_400));
    assert_eq!(harness.host.height_writes.len(), writes_before + 1);

    harness.resize(600.0, 500.0);
    harness.advance_ms(10_000);
    assert_eq!(harness.host.height_writes.len(), writes_before + 2);
    assert_eq!(harness.host.height_writes.last(), Some(&460.0));
}
