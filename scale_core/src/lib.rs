#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core acquisition logic (hardware-agnostic).
//!
//! One attempt reads a noisy line stream from a scale, collects parsed
//! samples under a wall-clock budget and reports the value the stream agrees
//! on. All hardware interaction goes through `scale_traits::LineSource`.
//!
//! ## Architecture
//!
//! - **Parsing**: configured regex extracts (value, unit) per line (`sample`)
//! - **Ingestion**: background thread owns the source, feeds a channel
//!   (`ingest`)
//! - **Evaluation**: mode-plus-tolerance consistency check (`consistency`)
//! - **Supervision**: settle delay, deadline, poll loop, single extension
//!   (`acquire`)
//!
//! Values are rounded to one decimal place at the parsing boundary; grouping
//! compares integer tenths so equality never depends on float bit patterns.

pub mod acquire;
pub mod consistency;
pub mod conversions;
pub mod error;
pub mod hw_error;
pub mod ingest;
pub mod sample;

pub use acquire::{
    AcquireSettings, DistributionWarning, EXTEND_BY, INCONSISTENT_DISTRIBUTION, POLL_INTERVAL,
    READ_TIMEOUT, Reading, SETTLE_DELAY, acquire, acquire_with_clock,
};
pub use consistency::{Peak, agreement_count, distribution_valid, peak_sample};
pub use error::{AcquireError, ParseError, Result};
pub use sample::{LinePattern, Sample};
