use std::future::Future;
use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};
use tokio::time::{sleep, sleep_until, Instant};

use crate::{Reply, RetrievalError};

/// Floor for the first backoff when no request delay is configured.
const MIN_INITIAL_BACKOFF: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateSettings {
    /// Minimum spacing between the end of one request and the start of the next.
    pub request_delay: Duration,
    /// Total attempts per request, the first one included.
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self::with_delay(Duration::from_millis(500))
    }
}

impl GateSettings {
    /// Backoff starts at the request delay, or at 1.5s when the delay is zero.
    pub fn with_delay(request_delay: Duration) -> Self {
        Self {
            request_delay,
            max_attempts: 5,
            initial_backoff: if request_delay.is_zero() {
                MIN_INITIAL_BACKOFF
            } else {
                request_delay
            },
            max_backoff: Duration::from_secs(60),
        }
    }
}

/// Retry state for a single request. A fresh one is created per `send`, so a
/// throttled page never inflates the delays of the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backoff {
    attempts: u32,
    next_delay: Duration,
    max_delay: Duration,
    max_attempts: u32,
}

impl Backoff {
    pub fn new(settings: &GateSettings) -> Self {
        Self {
            attempts: 0,
            next_delay: settings.initial_backoff.min(settings.max_backoff),
            max_delay: settings.max_backoff,
            max_attempts: settings.max_attempts.max(1),
        }
    }

    /// Records a throttled attempt and returns how long to wait before the
    /// next one, or `None` once the attempt ceiling is reached.
    pub fn on_throttle(&mut self, retry_after: Option<Duration>) -> Option<Duration> {
        self.attempts += 1;
        if self.attempts >= self.max_attempts {
            return None;
        }
        let computed = self.next_delay;
        self.next_delay = self.next_delay.saturating_mul(2).min(self.max_delay);
        Some(retry_after.unwrap_or(computed).min(self.max_delay))
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

/// Paces outbound calls and retries throttled ones. Other failures pass
/// through untouched.
#[derive(Debug)]
pub struct RequestGate {
    settings: GateSettings,
    last_return: Option<Instant>,
}

impl RequestGate {
    pub fn new(settings: GateSettings) -> Self {
        Self {
            settings,
            last_return: None,
        }
    }

    async fn wait_for_slot(&self) {
        let Some(last) = self.last_return else {
            return;
        };
        let ready = last + self.settings.request_delay;
        if ready > Instant::now() {
            sleep_until(ready).await;
        }
    }

    pub async fn send<T, F, Fut>(&mut self, mut call: F) -> Result<T, RetrievalError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Reply<T>, RetrievalError>>,
    {
        let mut backoff = Backoff::new(&self.settings);
        loop {
            self.wait_for_slot().await;
            let reply = call().await;
            self.last_return = Some(Instant::now());

            match reply? {
                Reply::Ready(value) => {
                    if backoff.attempts() > 0 {
                        engine_debug!("Request succeeded after {} throttled attempts", backoff.attempts());
                    }
                    return Ok(value);
                }
                Reply::Throttled { retry_after } => match backoff.on_throttle(retry_after) {
                    Some(delay) => {
                        engine_warn!(
                            "Rate limited (attempt {}/{}), backing off {:?}",
                            backoff.attempts(),
                            self.settings.max_attempts,
                            delay
                        );
                        sleep(delay).await;
                    }
                    None => {
                        engine_warn!("Rate limited {} times; giving up", backoff.attempts());
                        return Err(RetrievalError::RateLimitExhausted {
                            attempts: backoff.attempts(),
                        });
                    }
                },
            }
        }
    }
}
