//! Retry with exponential backoff for transient gateway failures
//!
//! Rate limits and timeouts are recovered here, inside the collaborator,
//! so they only surface to the orchestrator once retries are exhausted.

use async_trait::async_trait;
use ijma_application::ports::llm_gateway::{GatewayError, LlmGateway};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Run `op`, retrying transient failures with doubling delays.
///
/// `max_attempts` counts the first try. Non-transient errors and the final
/// transient error propagate unchanged.
pub async fn with_backoff<T, F, Fut>(
    max_attempts: usize,
    base_delay: Duration,
    mut op: F,
) -> Result<T, GatewayError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GatewayError>>,
{
    let mut delay = base_delay;
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < max_attempts => {
                warn!(
                    "Transient gateway error (attempt {}/{}), retrying in {:?}: {}",
                    attempt, max_attempts, delay, e
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Gateway decorator that retries transient failures with backoff
pub struct RetryingGateway<G> {
    inner: Arc<G>,
    max_attempts: usize,
    base_delay: Duration,
}

impl<G: LlmGateway> RetryingGateway<G> {
    pub fn new(inner: Arc<G>, max_attempts: usize) -> Self {
        Self {
            inner,
            max_attempts: max_attempts.max(1),
            base_delay: Duration::from_secs(2),
        }
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }
}

#[async_trait]
impl<G: LlmGateway> LlmGateway for RetryingGateway<G> {
    async fn complete(&self, system_prompt: &str, prompt: &str) -> Result<String, GatewayError> {
        with_backoff(self.max_attempts, self.base_delay, || {
            self.inner.complete(system_prompt, prompt)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FlakyGateway {
        failures_before_success: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LlmGateway for FlakyGateway {
        async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, GatewayError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures_before_success {
                Err(GatewayError::RateLimited("429".into()))
            } else {
                Ok("ok".into())
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_transient_until_success() {
        let gateway = RetryingGateway::new(
            Arc::new(FlakyGateway {
                failures_before_success: 2,
                calls: AtomicUsize::new(0),
            }),
            3,
        );

        let result = gateway.complete("s", "p").await;
        assert_eq!(result.unwrap(), "ok");
        assert_eq!(gateway.inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries_surface_error() {
        let gateway = RetryingGateway::new(
            Arc::new(FlakyGateway {
                failures_before_success: 10,
                calls: AtomicUsize::new(0),
            }),
            3,
        );

        let result = gateway.complete("s", "p").await;
        assert!(matches!(result, Err(GatewayError::RateLimited(_))));
        assert_eq!(gateway.inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_transient_fails_immediately() {
        struct HardFail;

        #[async_trait]
        impl LlmGateway for HardFail {
            async fn complete(&self, _s: &str, _p: &str) -> Result<String, GatewayError> {
                Err(GatewayError::RequestFailed("400".into()))
            }
        }

        let gateway = RetryingGateway::new(Arc::new(HardFail), 5);
        let result = gateway.complete("s", "p").await;
        assert!(matches!(result, Err(GatewayError::RequestFailed(_))));
    }
}
