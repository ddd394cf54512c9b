//! Diagnostic sink injected into the traversal.
//!
//! The engine never decides anything based on what it reports; a [`Reporter`]
//! only receives messages.

/// Receives informational messages and recoverable warnings.
pub trait Reporter {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Forwards to `tracing`. With `quiet` set, informational messages are dropped;
/// warnings always go through.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter {
    quiet: bool,
}

impl TracingReporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Reporter for TracingReporter {
    fn info(&self, message: &str) {
        if !self.quiet {
            tracing::info!("{}", message);
        }
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}
