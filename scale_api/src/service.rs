//! Scale lookup and one-shot acquisition on top of the core engine.

use std::collections::BTreeMap;
use std::sync::Mutex;

use scale_core::error::Result;
use scale_core::{AcquireError, AcquireSettings, LinePattern, Reading};
use scale_hardware::SerialLineSource;

/// Owns the scale mapping and the compiled data pattern.
///
/// One acquisition runs at a time. The deployments this serves wire every
/// scale through one adapter, so concurrent port sessions were never a
/// supported state; the gate keeps that explicit.
pub struct ScaleService {
    settings: AcquireSettings,
    pattern: LinePattern,
    default_baud: u32,
    ports: BTreeMap<String, String>,
    gate: Mutex<()>,
}

impl ScaleService {
    /// Compiles the data pattern once; expects a validated config.
    pub fn from_config(cfg: &scale_config::Config) -> Result<Self> {
        Ok(Self {
            settings: AcquireSettings::from(&cfg.acquisition),
            pattern: LinePattern::compile(&cfg.acquisition.data_pattern)?,
            default_baud: cfg.serial.default_baud_rate,
            ports: cfg.scales.clone(),
            gate: Mutex::new(()),
        })
    }

    /// One acquisition attempt for `scale_id`, at `baud_rate` or the
    /// configured default.
    ///
    /// The port is opened only after the id resolves. Every exit path closes
    /// it again when the ingest session drops.
    pub fn acquire(&self, scale_id: &str, baud_rate: Option<u32>) -> Result<Reading> {
        let port = self
            .ports
            .get(scale_id)
            .ok_or_else(|| AcquireError::UnknownScale(scale_id.to_string()))?;

        let _serialized = self
            .gate
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let baud = baud_rate.unwrap_or(self.default_baud);
        tracing::info!(scale_id, port = %port, baud, "starting acquisition");
        let source = SerialLineSource::open(port, baud).map_err(|e| AcquireError::Port {
            port: port.clone(),
            reason: e.to_string(),
        })?;
        scale_core::acquire(source, &self.pattern, &self.settings)
    }
}
