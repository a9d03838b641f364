//! Per-call cancellation.
//!
//! A `CancelHandle` / `CancelToken` pair shares a `watch` channel. Firing the
//! handle wakes every clone of the token; dropping the handle without firing
//! leaves the token pending forever, so an abandoned handle never aborts a
//! request on its own.

use std::future::Future;

use tokio::sync::watch;

use crate::error::ApiError;

/// Create a linked handle and token.
pub fn pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Another token observing this handle.
    pub fn token(&self) -> CancelToken {
        CancelToken {
            rx: self.tx.subscribe(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the paired handle fires. Pends forever if the handle is
    /// dropped first.
    pub async fn cancelled(&mut self) {
        if self.rx.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }

    /// Run `fut` unless this token fires first, in which case `fut` is
    /// dropped and `ApiError::Cancelled` is returned.
    pub async fn run<F, T>(mut self, fut: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        if self.is_cancelled() {
            return Err(ApiError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.cancelled() => Err(ApiError::Cancelled),
            result = fut => result,
        }
    }
}
