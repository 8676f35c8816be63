#![no_main]
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

static PATTERN: OnceLock<scale_core::LinePattern> = OnceLock::new();

fuzz_target!(|data: &str| {
    // Serial lines are untrusted; parsing must never panic, only reject.
    let pattern = PATTERN
        .get_or_init(|| scale_core::LinePattern::compile(r"^(\d+\.?\d*)\s*(\w+)$").unwrap());
    let _ = pattern.parse(data);
});
