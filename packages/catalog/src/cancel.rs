//! Per-request cancellation.
//!
//! A screen owns a [`CancellationToken`] and cancels it when it unmounts. Any
//! fetch wrapped in [`cancellable`] then resolves to [`FetchError::Cancelled`]
//! and the in-flight request future is dropped, which aborts the HTTP call.

use std::future::Future;
use std::pin::pin;

use futures::future::{select, Either};
pub use tokio_util::sync::CancellationToken;

use crate::error::FetchError;

/// Run `fut` until it completes or `token` is cancelled, whichever comes first.
pub async fn cancellable<T, F>(token: &CancellationToken, fut: F) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, FetchError>>,
{
    if token.is_cancelled() {
        return Err(FetchError::Cancelled);
    }
    let fut = pin!(fut);
    let cancelled = pin!(token.cancelled());
    match select(fut, cancelled).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(FetchError::Cancelled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_when_not_cancelled() {
        let token = CancellationToken::new();
        let result = cancellable(&token, async { Ok::<_, FetchError>(7) }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn test_already_cancelled_never_polls() {
        let token = CancellationToken::new();
        token.cancel();
        let polled = std::cell::Cell::new(false);
        let result = cancellable(&token, async {
            polled.set(true);
            Ok::<(), FetchError>(())
        })
        .await;
        assert_eq!(result, Err(FetchError::Cancelled));
        assert!(!polled.get());
    }

    #[tokio::test]
    async fn test_cancel_interrupts_pending_request() {
        let token = CancellationToken::new();
        let canceller = token.clone();
        let pending = futures::future::pending::<Result<(), FetchError>>();
        let (result, ()) = futures::join!(cancellable(&token, pending), async move {
            canceller.cancel();
        });
        assert_eq!(result, Err(FetchError::Cancelled));
    }
}
