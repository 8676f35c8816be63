//! End-to-end acquisition attempts against scripted line sources.
//!
//! These run on the real clock with short budgets; the settle delay puts a
//! floor of ~500 ms under each attempt.

use std::time::Duration;

use scale_core::error::AcquireError;
use scale_core::{AcquireSettings, LinePattern, acquire};
use scale_hardware::ScriptedLines;

fn pattern() -> LinePattern {
    LinePattern::compile(r"^(\d+\.?\d*)\s*(\w+)$").expect("pattern")
}

fn settings(sample_size: usize, timeout_ms: u64) -> AcquireSettings {
    AcquireSettings {
        sample_size,
        timeout: Duration::from_millis(timeout_ms),
        error_tolerance: 0.2,
    }
}

#[test]
fn consistent_stream_yields_a_clean_reading() {
    let source = ScriptedLines::new().lines([
        "12.0 kg", "12.1 kg", "12.0 kg", "12.0 kg", "25.4 kg", "12.0 kg",
    ]);
    let reading = acquire(source, &pattern(), &settings(5, 2000)).expect("reading");
    assert_eq!(reading.value, 12.0);
    assert_eq!(reading.unit, "kg");
    assert!(reading.warning.is_none());
}

#[test]
fn dispersed_single_mode_succeeds_with_warning() {
    // 12.0 dominates but only three samples agree within tolerance.
    let source =
        ScriptedLines::new().lines(["12.0 kg", "12.0 kg", "25.4 kg", "30.1 kg", "12.0 kg"]);
    let reading = acquire(source, &pattern(), &settings(5, 2000)).expect("reading");
    assert_eq!(reading.value, 12.0);
    let warning = reading.warning.expect("warning");
    assert_eq!(warning.message, "Inconsistent data distribution");
    // Raw values ride along in reception order.
    assert_eq!(warning.sample, vec![12.0, 12.0, 25.4, 30.1, 12.0]);
}

#[test]
fn malformed_lines_are_dropped_not_fatal() {
    let source = ScriptedLines::new()
        .line("garbage")
        .line("?? kg")
        .lines(["9.0 g", "9.0 g", "9.0 g"]);
    let reading = acquire(source, &pattern(), &settings(3, 2000)).expect("reading");
    assert_eq!(reading.value, 9.0);
    assert_eq!(reading.unit, "g");
    assert!(reading.warning.is_none());
}

#[test]
fn silent_port_times_out_with_the_canonical_message() {
    let source = ScriptedLines::new();
    let err = acquire(source, &pattern(), &settings(5, 300)).expect_err("timeout");
    let acquire_err = err.downcast_ref::<AcquireError>().expect("typed error");
    assert!(matches!(acquire_err, AcquireError::Timeout));
    assert_eq!(acquire_err.to_string(), "Data collection timed out");
}

#[test]
fn too_few_samples_before_the_deadline_is_a_timeout() {
    let source = ScriptedLines::new().lines(["5.0 kg", "5.0 kg"]);
    let err = acquire(source, &pattern(), &settings(5, 400)).expect_err("timeout");
    assert!(matches!(
        err.downcast_ref::<AcquireError>(),
        Some(AcquireError::Timeout)
    ));
}

#[test]
fn ambiguous_buffer_recovers_via_extension() {
    // Four samples arrive during the settle window and tie 10.0/20.0 with no
    // tolerance support. Five more 10.0 arrive ~350 ms into the deadline, so
    // the single extension resolves within the original budget.
    let source = ScriptedLines::new()
        .lines(["10.0 kg", "10.0 kg", "20.0 kg", "20.0 kg"])
        .pause(Duration::from_millis(850))
        .lines(["10.0 kg", "10.0 kg", "10.0 kg", "10.0 kg", "10.0 kg"]);
    let reading = acquire(source, &pattern(), &settings(4, 2000)).expect("reading");
    assert_eq!(reading.value, 10.0);
    assert_eq!(reading.unit, "kg");
    assert!(reading.warning.is_none());
}

#[test]
fn unresolved_tie_exhausts_the_deadline() {
    let source = ScriptedLines::new().lines(["10.0 kg", "10.0 kg", "20.0 kg", "20.0 kg"]);
    let err = acquire(source, &pattern(), &settings(4, 400)).expect_err("timeout");
    assert!(matches!(
        err.downcast_ref::<AcquireError>(),
        Some(AcquireError::Timeout)
    ));
}

#[test]
fn still_ambiguous_after_extension_is_a_timeout() {
    // The extension reaches nine samples but no value ever dominates, so the
    // attempt fails even though time remains.
    let source = ScriptedLines::new()
        .lines(["10.0 kg", "10.0 kg", "20.0 kg", "20.0 kg"])
        .pause(Duration::from_millis(850))
        .lines(["30.0 kg", "30.0 kg", "40.0 kg", "40.0 kg", "50.0 kg"]);
    let err = acquire(source, &pattern(), &settings(4, 2000)).expect_err("timeout");
    let acquire_err = err.downcast_ref::<AcquireError>().expect("typed error");
    assert_eq!(acquire_err.to_string(), "Data collection timed out");
}
