/// Request context
///
/// Carries the request id used in logs and the overall deadline every store
/// call and the hashing step must respect.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub operation: &'static str,
    deadline: Instant,
}

impl RequestContext {
    pub fn new(operation: &'static str, timeout: Duration) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            operation,
            deadline: Instant::now() + timeout,
        }
    }

    /// Await `fut`, giving up with `DeadlineExceeded` once the deadline passes.
    /// The abandoned future is dropped, which cancels any pending I/O.
    pub async fn run<F, T>(&self, step: &str, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        match tokio::time::timeout_at(self.deadline, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    request_id = %self.request_id,
                    operation = self.operation,
                    step,
                    "Deadline exceeded"
                );
                Err(AppError::DeadlineExceeded(step.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_completes_before_deadline() {
        let ctx = RequestContext::new("test", Duration::from_secs(5));
        let value = ctx.run("step", async { Ok::<_, AppError>(42) }).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_run_reports_deadline_exceeded() {
        let ctx = RequestContext::new("test", Duration::from_millis(10));
        let result = ctx
            .run("slow_step", async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, AppError>(())
            })
            .await;

        match result {
            Err(AppError::DeadlineExceeded(step)) => assert_eq!(step, "slow_step"),
            other => panic!("Expected DeadlineExceeded, got {:?}", other),
        }
    }
}
