//! Lifecycle-bound diagnostics channel owned by a session.

use tracing::debug;

/// Sink for session lifecycle diagnostics.
///
/// A session owns exactly one channel and closes it (flushing) as part of
/// its teardown sequence. `close` must be idempotent: the session calls it
/// once, but implementations must tolerate defensive repeats.
pub trait DiagnosticsChannel: Send {
    /// Records one diagnostic line. Lines recorded after close are
    /// discarded.
    fn log(&mut self, line: &str);

    /// Closes the channel, flushing buffered lines when `flush` is set.
    fn close(&mut self, flush: bool);
}

/// Default channel buffering lines and emitting them through `tracing` on
/// flush.
pub struct TracingDiagnostics {
    buffered: Vec<String>,
    closed: bool,
}

impl TracingDiagnostics {
    pub fn new() -> Self {
        Self {
            buffered: Vec::new(),
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Lines recorded but not yet flushed.
    pub fn pending(&self) -> usize {
        self.buffered.len()
    }
}

impl Default for TracingDiagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticsChannel for TracingDiagnostics {
    fn log(&mut self, line: &str) {
        if self.closed {
            return;
        }
        self.buffered.push(line.to_string());
    }

    fn close(&mut self, flush: bool) {
        if self.closed {
            return;
        }
        self.closed = true;
        if flush {
            for line in self.buffered.drain(..) {
                debug!(target = "gfs.diagnostics", "{line}");
            }
        } else {
            self.buffered.clear();
        }
    }
}
