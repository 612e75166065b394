use rand::Rng as _;
use std::{thread, time::Duration};

/// Suspension point between attempts, injectable for tests.
pub trait Sleep {
    fn sleep(&self, duration: Duration);
}

/// Blocking wall-clock sleep.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleep;

impl Sleep for ThreadSleep {
    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

pub type BackoffFn = fn(u32) -> Duration;

/// `2^attempt` seconds plus up to one second of random jitter.
/// Attempts are counted from zero.
pub fn exponential_backoff_with_jitter(attempt: u32) -> Duration {
    let base = 1u64 << attempt.min(16);
    Duration::from_secs_f64(base as f64 + rand::thread_rng().gen_range(0.0..1.0))
}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: BackoffFn,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: exponential_backoff_with_jitter,
        }
    }
}

impl RetryPolicy {
    /// Runs `op` until it succeeds, fails non-transiently, or all attempts
    /// are exhausted. There is no sleep after the final attempt.
    pub fn run<T, E, F, P, S>(&self, sleep: &S, is_transient: P, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
        P: Fn(&E) -> bool,
        S: Sleep,
    {
        let mut attempt = 0;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(err) if is_transient(&err) && attempt + 1 < self.max_attempts => {
                    let delay = (self.backoff)(attempt);
                    log::info!(
                        "Attempt {} failed, waiting {:.2} seconds",
                        attempt + 1,
                        delay.as_secs_f64()
                    );
                    sleep.sleep(delay);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
