//! # CPU Pinning Tests

use rowfetch_core::bench::pin_to_cpu;

#[cfg(target_os = "linux")]
#[test]
fn test_cpu_beyond_mask_is_invalid() {
    let err = pin_to_cpu(1 << 20).unwrap_err();
    assert!(matches!(err, rowfetch_core::BenchError::InvalidConfig(_)));
}

#[cfg(not(target_os = "linux"))]
#[test]
fn test_pinning_is_a_no_op_off_linux() {
    assert!(pin_to_cpu(0).is_ok());
}
