//! TypeScript Generation Tests
//!
//! Validates that comparison results can be exported to TypeScript when the
//! tauri feature is enabled.

#[cfg(feature = "tauri")]
#[test]
fn test_result_types_implement_specta_type() {
    use specta::Type;

    // If this compiles, every type a frontend receives derives `Type`.
    fn assert_type<T: Type>() {}

    assert_type::<paddock::SessionKey>();
    assert_type::<paddock::SessionKind>();
    assert_type::<paddock::LapTime>();
    assert_type::<paddock::LapDelta>();
    assert_type::<paddock::ComparisonConfig>();
    assert_type::<paddock::LapComparison>();
    assert_type::<paddock::LapGrid>();
    assert_type::<paddock::TelemetryComparison>();
    assert_type::<paddock::SessionOverview>();
    assert_type::<paddock::ComparisonReport>();
}

#[cfg(not(feature = "tauri"))]
#[test]
fn test_tauri_feature_disabled() {
    // Result types still serialize without specta
    let config = paddock::ComparisonConfig::default();
    let yaml = serde_yaml_ng::to_string(&config).unwrap();
    assert!(yaml.contains("MaxComparisonDrivers: 5"));
}
