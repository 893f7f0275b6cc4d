//! Toast notification state.

use std::time::{Duration, Instant};

/// Severity of a toast, which picks its title and colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastType {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient message shown over the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub toast_type: ToastType,
    pub expires: Instant,
}

impl Toast {
    #[must_use]
    pub fn new(message: impl Into<String>, toast_type: ToastType, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            toast_type,
            expires: Instant::now() + ttl,
        }
    }

    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires
    }
}
