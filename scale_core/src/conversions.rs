//! `From` implementations bridging `scale_config` types to core settings.
//!
//! Keeps the config crate serde-only and the core free of TOML concerns.

use std::time::Duration;

use crate::acquire::AcquireSettings;

// ── AcquireSettings ──────────────────────────────────────────────────────────

impl From<&scale_config::AcquisitionCfg> for AcquireSettings {
    fn from(c: &scale_config::AcquisitionCfg) -> Self {
        Self {
            sample_size: c.sample_size,
            timeout: Duration::from_millis(c.timeout_ms),
            error_tolerance: c.error_tolerance,
        }
    }
}
