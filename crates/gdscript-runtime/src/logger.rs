//! A narrow logging facade used only by the incremental cache and a
//! scene-provider boundary. This is not a replacement for `tracing`,
//! which the rest of the toolkit uses directly for in-process
//! diagnostics — it exists because those two call sites are the ones a
//! host with its own logging system most often wants to intercept.

/// Four severities, mirroring what a typical host logging API exposes.
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// Discards every message. Useful for tests that don't care about log
/// output and don't want to pull in a subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warning(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// Forwards every call to the corresponding `tracing` macro, so a host
/// with no logging integration of its own still gets output through
/// whatever `tracing` subscriber the process has installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!("{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn warning(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_logger_accepts_every_severity() {
        let logger = NullLogger;
        logger.debug("d");
        logger.info("i");
        logger.warning("w");
        logger.error("e");
    }
}
