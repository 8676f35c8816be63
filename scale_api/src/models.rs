//! Wire shapes for the HTTP surface.
//!
//! Field names are snake_case on the wire. `warning` is omitted entirely
//! when the reading was clean, so monitors can key on its presence.

use chrono::Utc;
use scale_core::{DistributionWarning, Reading};
use serde::Serialize;

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub success: bool,
    pub status: &'static str,
    pub timestamp: String,
}

impl ServiceStatus {
    pub fn now() -> Self {
        Self {
            success: true,
            status: "Healthy",
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Body of a successful `GET /scale/{id}`.
#[derive(Debug, Serialize)]
pub struct ReadingBody {
    pub success: bool,
    pub scale_id: String,
    pub data: WeightData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<WarningBody>,
}

#[derive(Debug, Serialize)]
pub struct WeightData {
    pub weight: f64,
    pub unit: String,
}

/// Data-quality note copied through unchanged from the core result.
#[derive(Debug, Serialize)]
pub struct WarningBody {
    pub message: String,
    pub sample: Vec<f64>,
}

impl From<DistributionWarning> for WarningBody {
    fn from(w: DistributionWarning) -> Self {
        Self {
            message: w.message.to_string(),
            sample: w.sample,
        }
    }
}

impl ReadingBody {
    pub fn new(scale_id: &str, reading: Reading) -> Self {
        Self {
            success: true,
            scale_id: scale_id.to_string(),
            data: WeightData {
                weight: reading.value,
                unit: reading.unit,
            },
            warning: reading.warning.map(WarningBody::from),
        }
    }
}

/// Body of a successful `GET /scale/{id}/health`.
#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub success: bool,
    pub uuid: String,
    pub status: &'static str,
    pub value: f64,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<WarningBody>,
    pub timestamp: String,
}

impl HealthBody {
    pub fn now(uuid: &str, reading: Reading) -> Self {
        Self {
            success: true,
            uuid: uuid.to_string(),
            status: "Healthy",
            value: reading.value,
            unit: reading.unit,
            warning: reading.warning.map(WarningBody::from),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
