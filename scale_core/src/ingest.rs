//! Background line ingestion.
//!
//! Spawns a thread that owns the `LineSource`, parses every received line and
//! forwards accepted samples over an unbounded FIFO channel, preserving
//! reception order. Malformed lines and per-read timeouts are logged and
//! dropped; they never end the session.
//!
//! Safety: each `Ingest` spawns exactly one thread that is shut down when the
//! `Ingest` is dropped, closing the source (and its port) with it.
use crossbeam_channel as xch;
use scale_traits::LineSource;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::hw_error::{LineFault, classify_line_error};
use crate::sample::{LinePattern, Sample};

pub struct Ingest {
    rx: xch::Receiver<Sample>,
    /// Shutdown flag for immediate response (atomic for lock-free check)
    shutdown: Arc<AtomicBool>,
    /// Join handle for graceful thread cleanup
    join_handle: Option<std::thread::JoinHandle<()>>,
}

impl Ingest {
    pub fn spawn<L: LineSource + Send + 'static>(
        mut source: L,
        pattern: LinePattern,
        read_timeout: Duration,
    ) -> Self {
        let (tx, rx) = xch::unbounded();
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let join_handle = std::thread::spawn(move || {
            loop {
                // Immediate shutdown check (lock-free atomic)
                if shutdown_clone.load(Ordering::Relaxed) {
                    tracing::debug!("ingest thread received shutdown signal");
                    break;
                }

                match source.read_line(read_timeout) {
                    Ok(line) => {
                        tracing::trace!(line = %line, "line received");
                        match pattern.parse(&line) {
                            Ok(sample) => {
                                tracing::debug!(
                                    value = sample.value,
                                    unit = %sample.unit,
                                    "sample accepted"
                                );
                                // If send fails, consumer is gone; exit gracefully
                                if tx.send(sample).is_err() {
                                    tracing::debug!(
                                        "ingest consumer disconnected, exiting thread"
                                    );
                                    break;
                                }
                            }
                            Err(e) => {
                                tracing::warn!(error = %e, "line dropped");
                            }
                        }
                    }
                    Err(e) => match classify_line_error(&*e) {
                        LineFault::Timeout => {
                            tracing::trace!("no data this cycle");
                        }
                        LineFault::Failed(msg) => {
                            tracing::warn!(error = %msg, "line read failed");
                        }
                    },
                }
            }
            tracing::trace!("ingest thread exiting cleanly");
        });

        Self {
            rx,
            shutdown,
            join_handle: Some(join_handle),
        }
    }

    pub fn receiver(&self) -> &xch::Receiver<Sample> {
        &self.rx
    }
}

impl Drop for Ingest {
    fn drop(&mut self) {
        // Signal shutdown immediately (atomic store is very fast)
        self.shutdown.store(true, Ordering::Relaxed);

        // The thread exits:
        // 1. Immediately if it is between reads (flag check at loop top)
        // 2. After the current read_line completes, up to the read timeout
        if let Some(handle) = self.join_handle.take() {
            match handle.join() {
                Ok(()) => {
                    tracing::trace!("ingest thread joined successfully");
                }
                Err(e) => {
                    // Thread panicked; log but don't propagate (we're in Drop)
                    tracing::warn!(?e, "ingest thread panicked during shutdown");
                }
            }
        }
    }
}
