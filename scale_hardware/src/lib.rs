pub mod error;
pub mod serial;
pub mod sim;

pub use error::{HwError, Result};
pub use serial::SerialLineSource;
pub use sim::ScriptedLines;
