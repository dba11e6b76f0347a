use super::*;

fn profile(cpus: usize, mem: Option<f64>) -> DeviceProfile {
    DeviceProfile {
        logical_cpus: cpus,
        memory_gb: mem,
    }
}

#[test]
fn manual_override_wins_including_zero() {
    let cfg = OverscanConfig {
        manual_override: Some(0),
    };
    assert_eq!(
        estimate_overscan_rows(cfg, profile(8, Some(16.0)), 800, 72, 5),
        0
    );
    let cfg = OverscanConfig {
        manual_override: Some(42),
    };
    // Override also bypasses the degenerate-input fallback.
    assert_eq!(estimate_overscan_rows(cfg, profile(1, None), 0, 0, 0), 42);
}

#[test]
fn degenerate_layout_returns_fallback() {
    let cfg = OverscanConfig::default();
    let p = profile(8, None);
    assert_eq!(estimate_overscan_rows(cfg, p, 0, 72, 5), 5);
    assert_eq!(estimate_overscan_rows(cfg, p, 800, 0, 5), 5);
    assert_eq!(estimate_overscan_rows(cfg, p, 800, 72, 0), 5);
}

#[test]
fn tier_classification() {
    assert_eq!(
        PerformanceTier::classify(profile(1, Some(32.0))),
        PerformanceTier::Low
    );
    assert_eq!(
        PerformanceTier::classify(profile(2, None)),
        PerformanceTier::Medium
    );
    assert_eq!(
        PerformanceTier::classify(profile(4, Some(4.0))),
        PerformanceTier::High
    );
    assert_eq!(
        PerformanceTier::classify(profile(8, Some(8.0))),
        PerformanceTier::VeryHigh
    );
    // Known low memory drags a fast CPU down.
    assert_eq!(
        PerformanceTier::classify(profile(8, Some(3.0))),
        PerformanceTier::Medium
    );
}

#[test]
fn unreported_memory_biases_toward_cpu_tier() {
    assert_eq!(
        PerformanceTier::classify(profile(8, None)),
        PerformanceTier::VeryHigh
    );
    assert_eq!(
        PerformanceTier::classify(profile(4, None)),
        PerformanceTier::High
    );
}

#[test]
fn very_high_never_renders_less_than_low() {
    let cfg = OverscanConfig::default();
    for (visible, item) in [(800u32, 72u32), (600, 48), (1080, 128), (400, 256)] {
        let low = estimate_overscan_rows(cfg, profile(1, Some(2.0)), visible, item, 4);
        let very_high = estimate_overscan_rows(cfg, profile(8, None), visible, item, 4);
        assert!(
            very_high >= low,
            "very-high {very_high} < low {low} for visible={visible} item={item}"
        );
    }
}

#[test]
fn tier_minimums_apply_to_tiny_viewports() {
    let cfg = OverscanConfig::default();
    // One-row viewport: the multiplier alone yields few rows, minimums kick in.
    assert_eq!(estimate_overscan_rows(cfg, profile(1, Some(2.0)), 10, 100, 4), 5);
    assert_eq!(estimate_overscan_rows(cfg, profile(2, None), 10, 100, 4), 7);
    assert_eq!(estimate_overscan_rows(cfg, profile(4, None), 10, 100, 4), 10);
    assert_eq!(estimate_overscan_rows(cfg, profile(16, None), 10, 100, 4), 15);
}

#[test]
fn high_tier_bonus_applies() {
    let cfg = OverscanConfig::default();
    // visible=720, item=72: 10 visible rows. High: target=ceil(2880/72)=40,
    // base=30, +25% => 38. VeryHigh: target=50, base=40, +50% => 60.
    assert_eq!(
        estimate_overscan_rows(cfg, profile(4, None), 720, 72, 4),
        38
    );
    assert_eq!(
        estimate_overscan_rows(cfg, profile(8, None), 720, 72, 4),
        60
    );
}
