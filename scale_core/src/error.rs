use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum AcquireError {
    #[error("unknown scale id: {0}")]
    UnknownScale(String),
    #[error("error handling serial port {port}: {reason}")]
    Port { port: String, reason: String },
    // Display text is the user-facing failure message.
    #[error("Data collection timed out")]
    Timeout,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line did not match the data pattern: {0:?}")]
    FormatInvalid(String),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
