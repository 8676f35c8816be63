//! Classifies `Box<dyn Error>` from the `LineSource` boundary.
//!
//! The trait uses `Box<dyn Error + Send + Sync>` for maximum flexibility;
//! the ingestion loop only needs to distinguish "no data this cycle" from a
//! real fault. An optional feature-gated path downcasts
//! `scale_hardware::HwError` precisely.

/// What a failed line read means to the ingestion loop.
#[derive(Debug, PartialEq, Eq)]
pub enum LineFault {
    /// The read window elapsed with no complete line; routine.
    Timeout,
    /// Anything else; logged loudly, the supervisor's deadline decides.
    Failed(String),
}

/// Classify a trait-boundary error.
///
/// Attempts to downcast known hardware error types first, then falls back
/// to string-based heuristics.
pub fn classify_line_error(e: &(dyn std::error::Error + 'static)) -> LineFault {
    // Feature-gated: try to downcast to HwError for precise mapping
    #[cfg(feature = "hardware-errors")]
    {
        if let Some(hw) = e.downcast_ref::<scale_hardware::error::HwError>() {
            return match hw {
                scale_hardware::error::HwError::ReadTimeout => LineFault::Timeout,
                other => LineFault::Failed(other.to_string()),
            };
        }
    }

    // Fallback: string-based detection
    let s = e.to_string();
    if s.to_lowercase().contains("timeout") {
        LineFault::Timeout
    } else {
        LineFault::Failed(s)
    }
}
