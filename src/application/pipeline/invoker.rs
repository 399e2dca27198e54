//! Resilient Invoker - 带退避重试的后端调用
//!
//! 错误只在这里分类一次:
//! - 消息中带过载/限流标记的错误重试，直到用完次数
//! - 其余错误立即返回

use std::future::Future;
use std::time::Duration;

use crate::application::ports::BackendError;

/// 过载类错误的消息标记（小写匹配）
const OVERLOAD_MARKERS: &[&str] = &[
    "503",
    "overloaded",
    "unavailable",
    "too many requests",
    "rate limit",
    "quota",
];

/// 重试策略
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub backoff: f64,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(2000),
            backoff: 2.0,
            max_delay: Duration::from_millis(60_000),
        }
    }
}

impl RetryPolicy {
    /// 第 `attempt` 次失败（从 0 开始）之后的等待时间
    ///
    /// `min(base_delay * backoff^attempt, max_delay)`，按毫秒取整
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let base = self.base_delay.as_millis() as f64;
        let cap = self.max_delay.as_millis() as f64;
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let millis = (base * self.backoff.powi(exponent)).min(cap);
        Duration::from_millis(millis.round() as u64)
    }

    /// 总尝试次数
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

/// 单次尝试的分类结果
#[derive(Debug)]
pub enum Attempt<T> {
    Success(T),
    RetryableFailure(BackendError),
    FatalFailure(BackendError),
}

impl<T> Attempt<T> {
    pub fn classify(result: Result<T, BackendError>) -> Self {
        match result {
            Ok(value) => Attempt::Success(value),
            Err(err) if is_overload(&err) => Attempt::RetryableFailure(err),
            Err(err) => Attempt::FatalFailure(err),
        }
    }
}

/// 是否为过载/不可用类错误
pub fn is_overload(err: &BackendError) -> bool {
    let message = err.to_string().to_lowercase();
    OVERLOAD_MARKERS.iter().any(|m| message.contains(m))
}

/// 调用失败
#[derive(Debug, Clone)]
pub enum InvokeFailure {
    /// 重试耗尽，携带最后一次错误
    Overloaded(BackendError),
    /// 不可重试的错误
    Rejected(BackendError),
}

impl InvokeFailure {
    pub fn error(&self) -> &BackendError {
        match self {
            InvokeFailure::Overloaded(e) | InvokeFailure::Rejected(e) => e,
        }
    }

    pub fn into_error(self) -> BackendError {
        match self {
            InvokeFailure::Overloaded(e) | InvokeFailure::Rejected(e) => e,
        }
    }
}

/// 一次调用的完整记录
#[derive(Debug)]
pub struct InvokeReport<T> {
    pub result: Result<T, InvokeFailure>,
    pub attempts: u32,
    /// 实际等待过的间隔
    pub waits: Vec<Duration>,
}

/// Resilient Invoker
#[derive(Debug, Clone, Default)]
pub struct ResilientInvoker {
    policy: RetryPolicy,
}

impl ResilientInvoker {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// 执行一个工作单元，按策略重试
    ///
    /// 等待只阻塞当前任务，不影响其他请求
    pub async fn invoke<T, F, Fut>(&self, label: &str, mut work: F) -> InvokeReport<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, BackendError>>,
    {
        let max_attempts = self.policy.max_attempts();
        let mut waits = Vec::new();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            match Attempt::classify(work().await) {
                Attempt::Success(value) => {
                    if attempt > 1 {
                        tracing::info!(label, attempt, "Backend call succeeded after retry");
                    }
                    return InvokeReport {
                        result: Ok(value),
                        attempts: attempt,
                        waits,
                    };
                }
                Attempt::FatalFailure(err) => {
                    tracing::error!(label, attempt, error = %err, "Backend call failed (not retryable)");
                    return InvokeReport {
                        result: Err(InvokeFailure::Rejected(err)),
                        attempts: attempt,
                        waits,
                    };
                }
                Attempt::RetryableFailure(err) => {
                    if attempt >= max_attempts {
                        tracing::error!(
                            label,
                            attempt,
                            max_attempts,
                            error = %err,
                            "Backend still overloaded, retries exhausted"
                        );
                        return InvokeReport {
                            result: Err(InvokeFailure::Overloaded(err)),
                            attempts: attempt,
                            waits,
                        };
                    }

                    let wait = self.policy.delay_for(attempt - 1);
                    tracing::warn!(
                        label,
                        attempt,
                        max_attempts,
                        wait_ms = wait.as_millis() as u64,
                        error = %err,
                        "Backend overloaded, retrying"
                    );
                    tokio::time::sleep(wait).await;
                    waits.push(wait);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn overloaded() -> BackendError {
        BackendError::Status {
            status: "503 Service Unavailable".to_string(),
            body: "The model is overloaded".to_string(),
        }
    }

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            base_delay: Duration::from_millis(5),
            backoff: 2.0,
            max_delay: Duration::from_millis(12),
        }
    }

    #[test]
    fn test_delay_formula_caps_at_max() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_millis(2000));
        assert_eq!(policy.delay_for(1), Duration::from_millis(4000));
        assert_eq!(policy.delay_for(5), Duration::from_millis(60_000));
        assert_eq!(policy.max_attempts(), 4);
    }

    #[test]
    fn test_classification_markers() {
        assert!(is_overload(&overloaded()));
        assert!(is_overload(&BackendError::Network("Rate limit exceeded".into())));
        assert!(is_overload(&BackendError::Status {
            status: "429 Too Many Requests".into(),
            body: String::new(),
        }));
        assert!(is_overload(&BackendError::InvalidResponse("Quota exhausted".into())));
        assert!(!is_overload(&BackendError::Status {
            status: "401 Unauthorized".into(),
            body: "invalid API key".into(),
        }));
    }

    #[tokio::test]
    async fn test_two_overloads_then_success() {
        let invoker = ResilientInvoker::new(fast_policy(3));
        let calls = AtomicU32::new(0);

        let report = invoker
            .invoke("test", || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err(overloaded())
                    } else {
                        Ok("done")
                    }
                }
            })
            .await;

        assert_eq!(report.result.unwrap(), "done");
        assert_eq!(report.attempts, 3);
        assert_eq!(
            report.waits,
            vec![invoker.policy().delay_for(0), invoker.policy().delay_for(1)]
        );
        assert_eq!(report.waits, vec![Duration::from_millis(5), Duration::from_millis(10)]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_fatal_error_makes_single_attempt() {
        let invoker = ResilientInvoker::new(fast_policy(3));
        let calls = AtomicU32::new(0);

        let report = invoker
            .invoke("test", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Err::<(), _>(BackendError::Status {
                        status: "401 Unauthorized".into(),
                        body: "invalid credentials".into(),
                    })
                }
            })
            .await;

        assert!(matches!(report.result, Err(InvokeFailure::Rejected(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(report.waits.is_empty());
    }

    #[tokio::test]
    async fn test_exhausted_retries_report_overloaded() {
        let invoker = ResilientInvoker::new(fast_policy(2));
        let calls = AtomicU32::new(0);

        let report = invoker
            .invoke("test", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(overloaded()) }
            })
            .await;

        assert!(matches!(report.result, Err(InvokeFailure::Overloaded(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            report.waits,
            vec![Duration::from_millis(5), Duration::from_millis(10)]
        );
    }

    #[tokio::test]
    async fn test_zero_retries_means_one_attempt() {
        let invoker = ResilientInvoker::new(fast_policy(0));
        let report = invoker
            .invoke("test", || async { Err::<(), _>(overloaded()) })
            .await;
        assert_eq!(report.attempts, 1);
        assert!(report.waits.is_empty());
    }
}
