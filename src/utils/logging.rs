use std::fmt::Display;

use anyhow::Error;
use tracing::span::Span;

pub trait LogError {
    /// Logs a failure of a secondary action that must not replace the primary result.
    fn log_side_failure(&self, action: impl Display, error: Error);
}

impl LogError for Span {
    fn log_side_failure(&self, action: impl Display, error: Error) {
        self.in_scope(|| {
            tracing::error!("Could not {action}: {error:?}");
        });
    }
}
