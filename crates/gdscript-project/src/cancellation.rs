//! A concrete, cheaply-clonable cancellation token (§5 "Cancellation"),
//! threaded through every parallel analysis entry point and checked
//! between files (and, inside long validations, between per-method
//! passes).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::ToolError;

/// A flag that can be set from any thread to ask an in-progress
/// analysis to stop at its next checkpoint.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    canceled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }

    /// Returns `Err(ToolError::Canceled)` if this token has been
    /// canceled, `Ok(())` otherwise. Callers check this between files
    /// in parallel analysis and between per-method passes in long
    /// validations.
    pub fn check(&self) -> Result<(), ToolError> {
        if self.is_canceled() {
            Err(ToolError::Canceled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_is_not_canceled() {
        let token = CancellationToken::new();
        assert!(!token.is_canceled());
        assert!(token.check().is_ok());
    }

    #[test]
    fn canceling_is_visible_through_a_clone() {
        let token = CancellationToken::new();
        let clone = token.clone();
        token.cancel();
        assert!(clone.is_canceled());
        assert!(matches!(clone.check(), Err(ToolError::Canceled)));
    }
}
