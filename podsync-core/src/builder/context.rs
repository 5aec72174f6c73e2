// Build Context
//
// Per-build execution state shared by every upstream call of one build

use std::future::Future;

use podsync_providers::ProviderClientError;
use tokio_util::sync::CancellationToken;

use super::{BuildError, FetchStage};

/// Build execution context
///
/// Cloning shares the cancellation token, so a clone handed to another task
/// can cancel every build started with this context.
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    cancel: CancellationToken,
}

impl BuildContext {
    /// Create a context that is only cancelled explicitly
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context bound to an external token
    #[must_use]
    pub const fn with_cancellation(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    #[must_use]
    pub const fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drive one upstream request, tagging its error with `stage`.
    ///
    /// If the token fires first the request future is dropped, which aborts
    /// the in-flight HTTP call, and [`BuildError::Cancelled`] is returned.
    pub async fn call<T, F>(&self, stage: FetchStage, request: F) -> Result<T, BuildError>
    where
        F: Future<Output = Result<T, ProviderClientError>>,
    {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(BuildError::Cancelled),
            result = request => result.map_err(|e| BuildError::upstream(stage, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_call_maps_error_to_stage() {
        let ctx = BuildContext::new();
        let err = ctx
            .call(FetchStage::SeriesInfo, async {
                Err::<(), _>(ProviderClientError::Parse("eof".to_string()))
            })
            .await
            .unwrap_err();
        assert_eq!(err.stage(), Some(FetchStage::SeriesInfo));
    }

    #[tokio::test]
    async fn test_cancelled_context_skips_request() {
        let ctx = BuildContext::new();
        ctx.cancel();
        let err = ctx
            .call(FetchStage::UserInfo, async { Ok::<_, ProviderClientError>(1) })
            .await
            .unwrap_err();
        assert!(matches!(err, BuildError::Cancelled));
    }

    #[tokio::test]
    async fn test_cancel_aborts_pending_request() {
        let ctx = BuildContext::new();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let err = ctx
            .call(FetchStage::EpisodeInfo, std::future::pending::<Result<(), ProviderClientError>>())
            .await
            .unwrap_err();
        assert!(matches!(err, BuildError::Cancelled));
    }
}
