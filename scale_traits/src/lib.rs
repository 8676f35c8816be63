pub mod clock;

pub use clock::{Clock, MonotonicClock};

/// A device that emits line-oriented readings, one text line at a time.
///
/// Implementations block for at most `timeout` waiting for a complete line
/// and return it without the trailing newline. A timeout is an error at this
/// boundary; callers decide whether it is fatal.
pub trait LineSource {
    fn read_line(
        &mut self,
        timeout: std::time::Duration,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}
