//! The acquisition supervisor: one attempt end to end.
//!
//! The supervisor owns the attempt's buffer and its deadline. Ingestion runs
//! on its own thread; the supervisor only drains the channel at a fixed
//! cadence, so the deadline is observed independently of how fast (or
//! whether) the device talks. Dropping the ingestion handle on every exit
//! path is what guarantees the port is closed.

use crossbeam_channel as xch;
use std::time::{Duration, Instant};

use scale_traits::LineSource;
use scale_traits::clock::{Clock, MonotonicClock};

use crate::consistency::{Peak, agreement_count, peak_sample};
use crate::error::{AcquireError, Result};
use crate::ingest::Ingest;
use crate::sample::{LinePattern, Sample};

/// Pause between opening the port and starting the collection deadline,
/// letting the device's output stream stabilize.
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);
/// Cadence at which the supervisor drains the channel and checks the
/// deadline.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);
/// Bound for a single line read inside the ingestion thread.
pub const READ_TIMEOUT: Duration = Duration::from_millis(500);
/// How many extra samples the single extension asks for.
pub const EXTEND_BY: usize = 5;

/// Message attached to a successful reading whose tolerance-based agreement
/// count fell short of the required sample size.
pub const INCONSISTENT_DISTRIBUTION: &str = "Inconsistent data distribution";

/// Immutable per-process settings for one attempt.
#[derive(Debug, Clone)]
pub struct AcquireSettings {
    pub sample_size: usize,
    pub timeout: Duration,
    pub error_tolerance: f64,
}

/// Data-quality note carried by a success whose distribution is dispersed.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionWarning {
    pub message: &'static str,
    pub sample: Vec<f64>,
}

/// The final verdict of a successful attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub value: f64,
    pub unit: String,
    pub warning: Option<DistributionWarning>,
}

/// Run one acquisition attempt against `source` with the real clock.
pub fn acquire<L>(
    source: L,
    pattern: &LinePattern,
    settings: &AcquireSettings,
) -> Result<Reading>
where
    L: LineSource + Send + 'static,
{
    acquire_with_clock(source, pattern, settings, &MonotonicClock::new())
}

/// Clock-parameterized variant of [`acquire`].
pub fn acquire_with_clock<L, C>(
    source: L,
    pattern: &LinePattern,
    settings: &AcquireSettings,
    clock: &C,
) -> Result<Reading>
where
    L: LineSource + Send + 'static,
    C: Clock,
{
    let ingest = Ingest::spawn(source, pattern.clone(), READ_TIMEOUT);

    clock.sleep(SETTLE_DELAY);
    let started = clock.now();
    let deadline = started + settings.timeout;

    let mut buf: Vec<Sample> = Vec::new();
    if !collect_until(
        ingest.receiver(),
        &mut buf,
        settings.sample_size,
        deadline,
        clock,
    ) {
        tracing::warn!(
            collected = buf.len(),
            required = settings.sample_size,
            elapsed_ms = clock.ms_since(started),
            "data collection timed out"
        );
        return Err(AcquireError::Timeout.into());
    }
    tracing::info!(values = ?values_of(&buf), "collected samples");

    if let Some(peak) = peak_sample(&buf, settings.error_tolerance, settings.sample_size) {
        return Ok(finish(peak, &buf, settings));
    }

    // Full but ambiguous buffer: one extension, against the same deadline.
    let extended = settings.sample_size + EXTEND_BY;
    tracing::warn!(
        target = extended,
        "collected samples are not consistent, extending sample target"
    );
    if collect_until(ingest.receiver(), &mut buf, extended, deadline, clock) {
        tracing::info!(values = ?values_of(&buf), "collected samples after extension");
        if let Some(peak) = peak_sample(&buf, settings.error_tolerance, settings.sample_size) {
            return Ok(finish(peak, &buf, settings));
        }
        tracing::warn!("samples remained inconsistent after extension");
    } else {
        tracing::warn!(
            collected = buf.len(),
            elapsed_ms = clock.ms_since(started),
            "data collection timed out"
        );
    }
    Err(AcquireError::Timeout.into())
}

/// Drain newly arrived samples and wait until the buffer holds `target`
/// samples or `deadline` passes. True when the target was reached.
fn collect_until<C: Clock>(
    rx: &xch::Receiver<Sample>,
    buf: &mut Vec<Sample>,
    target: usize,
    deadline: Instant,
    clock: &C,
) -> bool {
    loop {
        buf.extend(rx.try_iter());
        if buf.len() >= target {
            return true;
        }
        if clock.now() >= deadline {
            return false;
        }
        clock.sleep(POLL_INTERVAL);
    }
}

fn finish(peak: Peak, buf: &[Sample], settings: &AcquireSettings) -> Reading {
    let agreement = agreement_count(buf, peak.value, settings.error_tolerance);
    let warning = if agreement >= settings.sample_size {
        None
    } else {
        tracing::warn!(
            agreement,
            required = settings.sample_size,
            "inconsistent data distribution"
        );
        Some(DistributionWarning {
            message: INCONSISTENT_DISTRIBUTION,
            sample: values_of(buf),
        })
    };
    tracing::info!(value = peak.value, unit = %peak.unit, "reading established");
    Reading {
        value: peak.value,
        unit: peak.unit,
        warning,
    }
}

#[inline]
fn values_of(buf: &[Sample]) -> Vec<f64> {
    buf.iter().map(|s| s.value).collect()
}
