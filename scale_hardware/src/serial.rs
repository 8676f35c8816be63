use std::io::Read;
use std::time::{Duration, Instant};

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};

use crate::error::{HwError, Result};
use scale_traits::LineSource;

/// Bound for one read on the underlying port. A read that exceeds this is
/// reported as `HwError::ReadTimeout`, not as a session failure.
pub const OP_TIMEOUT: Duration = Duration::from_millis(500);

/// One open serial connection to a scale, read line by line.
///
/// Framing is fixed: 8 data bits, no parity, one stop bit, no flow control.
/// The port is closed when the value is dropped.
pub struct SerialLineSource {
    port: Box<dyn SerialPort>,
    port_name: String,
    pending: Vec<u8>,
}

impl SerialLineSource {
    pub fn open(port_name: &str, baud_rate: u32) -> Result<Self> {
        let port = serialport::new(port_name, baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(OP_TIMEOUT)
            .open()
            .map_err(|e| HwError::Open(format!("{port_name}: {e}")))?;
        tracing::info!(port = port_name, baud = baud_rate, "serial port opened");
        Ok(Self {
            port,
            port_name: port_name.to_string(),
            pending: Vec::new(),
        })
    }
}

impl Drop for SerialLineSource {
    fn drop(&mut self) {
        tracing::info!(port = %self.port_name, "serial port closed");
    }
}

impl LineSource for SerialLineSource {
    fn read_line(
        &mut self,
        timeout: Duration,
    ) -> std::result::Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let deadline = Instant::now() + timeout;
        let mut byte = [0u8; 1];
        loop {
            if let Some(line) = take_line(&mut self.pending) {
                return Ok(line);
            }
            if Instant::now() >= deadline {
                return Err(Box::new(HwError::ReadTimeout));
            }
            match self.port.read(&mut byte) {
                Ok(0) => {
                    return Err(Box::new(HwError::Io(std::io::Error::new(
                        std::io::ErrorKind::UnexpectedEof,
                        "serial port returned EOF",
                    ))));
                }
                Ok(_) => self.pending.push(byte[0]),
                // The port's own timeout expired with no byte; the deadline
                // check above decides whether to keep waiting.
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {}
                Err(e) => return Err(Box::new(HwError::Io(e))),
            }
        }
    }
}

/// Split one complete line off the front of `pending`, newline stripped.
/// Partial data stays buffered for the next call.
#[inline]
fn take_line(pending: &mut Vec<u8>) -> Option<String> {
    let pos = pending.iter().position(|&b| b == b'\n')?;
    let mut line: Vec<u8> = pending.drain(..=pos).collect();
    line.pop();
    Some(String::from_utf8_lossy(&line).into_owned())
}
