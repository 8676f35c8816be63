#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for the scale acquisition service.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - The data pattern is checked here so a bad regex fails at startup,
//!   not on the first incoming line.
use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AcquisitionCfg {
    /// Samples that must agree before a reading is reported.
    pub sample_size: usize,
    /// Overall collection budget per attempt, in milliseconds.
    pub timeout_ms: u64,
    /// Max absolute deviation from the candidate value that still counts
    /// as agreement.
    pub error_tolerance: f64,
    /// Regex with two capture groups: numeric value, unit.
    pub data_pattern: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SerialCfg {
    /// Baud rate used when the caller does not supply one.
    pub default_baud_rate: u32,
}

impl Default for SerialCfg {
    fn default() -> Self {
        Self {
            default_baud_rate: 9600,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HttpCfg {
    pub bind_addr: String,
}

impl Default for HttpCfg {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub acquisition: AcquisitionCfg,
    #[serde(default)]
    pub serial: SerialCfg,
    #[serde(default)]
    pub http: HttpCfg,
    /// Scale identifier -> serial port name. BTreeMap keeps lookup and
    /// startup logging order deterministic.
    pub scales: BTreeMap<String, String>,
    #[serde(default)]
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Acquisition
        if self.acquisition.sample_size == 0 {
            eyre::bail!("acquisition.sample_size must be >= 1");
        }
        if self.acquisition.sample_size > 1000 {
            eyre::bail!("acquisition.sample_size is unreasonably large (>1000)");
        }
        if self.acquisition.timeout_ms == 0 {
            eyre::bail!("acquisition.timeout_ms must be >= 1");
        }
        if self.acquisition.timeout_ms > 10 * 60 * 1000 {
            eyre::bail!("acquisition.timeout_ms is unreasonably large (>10min)");
        }
        if !self.acquisition.error_tolerance.is_finite() || self.acquisition.error_tolerance < 0.0 {
            eyre::bail!("acquisition.error_tolerance must be finite and >= 0");
        }
        match regex::Regex::new(&self.acquisition.data_pattern) {
            Err(e) => {
                eyre::bail!("acquisition.data_pattern is not a valid regex: {e}");
            }
            // captures_len counts the implicit whole-match group.
            Ok(re) if re.captures_len() < 3 => {
                eyre::bail!("acquisition.data_pattern needs two capture groups (value, unit)");
            }
            Ok(_) => {}
        }

        // Serial
        if self.serial.default_baud_rate == 0 {
            eyre::bail!("serial.default_baud_rate must be > 0");
        }

        // Http
        if self.http.bind_addr.parse::<std::net::SocketAddr>().is_err() {
            eyre::bail!(
                "http.bind_addr must be a socket address like 127.0.0.1:5000, got '{}'",
                self.http.bind_addr
            );
        }

        // Scales
        if self.scales.is_empty() {
            eyre::bail!("[scales] must map at least one identifier to a port");
        }
        for (id, port) in &self.scales {
            if id.trim().is_empty() {
                eyre::bail!("[scales] contains an empty identifier");
            }
            if port.trim().is_empty() {
                eyre::bail!("[scales] port for '{id}' must not be empty");
            }
        }

        Ok(())
    }
}
