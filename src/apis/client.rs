/// Base HTTP client with rate limiting
///
/// Bounds concurrent upstream calls and paces them to a requests-per-minute
/// budget. The upstream API is a public free service; staying well under its
/// limits matters more than latency here.
use crate::errors::{StatsError, StatsResult};
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};

/// Rate limiter for upstream API calls
pub struct RateLimiter {
    semaphore: Arc<Semaphore>,
    last_request: Arc<Mutex<Option<Instant>>>,
    min_interval: Duration,
}

impl RateLimiter {
    pub fn new(max_concurrent: usize, max_per_minute: usize) -> Self {
        let min_interval = if max_per_minute > 0 {
            Duration::from_secs_f64(60.0 / max_per_minute as f64)
        } else {
            Duration::ZERO
        };

        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
            last_request: Arc::new(Mutex::new(None)),
            min_interval,
        }
    }

    /// Wait until a request slot is available and the pacing interval has
    /// elapsed, then hold the slot until the returned guard drops.
    pub async fn acquire(&self) -> StatsResult<RateLimitGuard> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| StatsError::Internal(format!("Rate limiter closed: {}", e)))?;

        if !self.min_interval.is_zero() {
            let mut last = self.last_request.lock().await;
            let now = Instant::now();

            if let Some(last_time) = *last {
                let elapsed = last_time.elapsed();
                if elapsed < self.min_interval {
                    let sleep_duration = self.min_interval - elapsed;
                    drop(last);
                    tokio::time::sleep(sleep_duration).await;
                    let mut relocked = self.last_request.lock().await;
                    *relocked = Some(Instant::now());
                } else {
                    *last = Some(now);
                }
            } else {
                *last = Some(now);
            }
        }

        Ok(RateLimitGuard { _permit: permit })
    }
}

/// RAII guard returned by [`RateLimiter::acquire`]
pub struct RateLimitGuard {
    _permit: OwnedSemaphorePermit,
}

/// HTTP client wrapper with a per-request timeout
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(timeout_secs: u64) -> StatsResult<Self> {
        if timeout_secs == 0 {
            return Err(StatsError::Config("Timeout must be greater than zero".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("dugout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StatsError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pacing_spaces_out_requests() {
        let limiter = RateLimiter::new(1, 600); // 100ms between requests

        let start = Instant::now();
        drop(limiter.acquire().await.unwrap());
        drop(limiter.acquire().await.unwrap());

        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[test]
    fn zero_timeout_rejected() {
        assert!(HttpClient::new(0).is_err());
        assert!(HttpClient::new(10).is_ok());
    }
}
