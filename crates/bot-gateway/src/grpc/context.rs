//! Per-call context: cancellation token plus optional deadline.
//!
//! Every client call takes a `&CallContext`. A join stream keeps a clone of
//! its context for its whole lifetime, so cancelling the token (or letting
//! the deadline pass) ends the stream as well as any in-flight unary call.

use crate::errors::BotError;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Cancellation and deadline scope for one or more calls.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl CallContext {
    /// A context that is never done unless cancelled explicitly.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A context driven by an existing cancellation token.
    #[must_use]
    pub fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Bound the context to `timeout` from now. Never extends an earlier deadline.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Bound the context to an absolute deadline. Never extends an earlier deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// A child context: cancelled when the parent is, cancellable on its own.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Cancel this context and all of its children.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[must_use]
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline; `None` when there is no deadline.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// The error a call should fail with if the context is already done.
    #[must_use]
    pub fn done_reason(&self) -> Option<BotError> {
        if self.token.is_cancelled() {
            return Some(BotError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if deadline <= Instant::now() => Some(BotError::DeadlineExceeded),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done_reason().is_some()
    }

    /// Resolves once the context is cancelled or its deadline passes.
    ///
    /// Explicit cancellation wins when both are ready.
    pub async fn done(&self) -> BotError {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    biased;
                    () = self.token.cancelled() => BotError::Cancelled,
                    () = tokio::time::sleep_until(deadline) => BotError::DeadlineExceeded,
                }
            }
            None => {
                self.token.cancelled().await;
                BotError::Cancelled
            }
        }
    }
}
