//! Cancellation and deadline propagation.
//!
//! A single root [`CallContext`] is created in `main` and cancelled on Ctrl+C.
//! Calls that need a bounded duration derive a child with
//! [`CallContext::with_timeout`]; cancelling the parent cancels every child.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Why a call guarded by a [`CallContext`] did not complete.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupted {
    #[error("canceled")]
    Canceled,

    #[error("timed out after {}s", .0.as_secs())]
    TimedOut(Duration),
}

#[derive(Debug, Clone, Copy)]
struct Deadline {
    at: Instant,
    timeout: Duration,
}

/// Cancellation token plus an optional deadline, passed to every external call.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    token: CancellationToken,
    deadline: Option<Deadline>,
}

impl CallContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing token, e.g. one shared with a signal handler.
    pub fn from_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Derive a child context that expires `timeout` from now.
    ///
    /// The child keeps the parent's deadline if that one is earlier.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let candidate = Deadline {
            at: Instant::now() + timeout,
            timeout,
        };
        let deadline = match self.deadline {
            Some(parent) if parent.at <= candidate.at => parent,
            _ => candidate,
        };

        Self {
            token: self.token.child_token(),
            deadline: Some(deadline),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.deadline.map(|d| d.timeout)
    }

    /// Drive `fut` until it completes, the context is cancelled, or the
    /// deadline passes. The future is dropped on interruption.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, Interrupted>
    where
        F: Future,
    {
        if self.token.is_cancelled() {
            return Err(Interrupted::Canceled);
        }

        let expiry = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline.at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(Interrupted::Canceled),
            () = expiry => Err(Interrupted::TimedOut(self.timeout().unwrap_or_default())),
            output = fut => Ok(output),
        }
    }
}
