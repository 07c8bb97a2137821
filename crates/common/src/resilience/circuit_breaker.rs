//! Circuit breaker state machine
//!
//! Closed → Open after `failure_threshold` consecutive failures; Open →
//! HalfOpen once `timeout` has elapsed; HalfOpen admits at most
//! `half_open_max_calls` probes and closes again after `success_threshold`
//! consecutive successes.

use std::future::Future;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

/// Error returned when a circuit breaker cannot be constructed
#[derive(Debug, Error)]
#[error("invalid circuit breaker configuration: {0}")]
pub struct InvalidConfiguration(pub String);

/// Errors produced by guarded execution
#[derive(Debug, Error)]
pub enum ResilienceError<E> {
    /// The breaker is open; the operation was not attempted
    #[error("circuit breaker open")]
    CircuitOpen,

    /// The operation ran and failed
    #[error("operation failed: {source}")]
    OperationFailed { source: E },
}

/// Breaker configuration
#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures before the breaker opens
    pub failure_threshold: u32,
    /// Consecutive half-open successes before the breaker closes
    pub success_threshold: u32,
    /// How long the breaker stays open before probing
    pub timeout: Duration,
    /// Concurrent probes admitted while half-open
    pub half_open_max_calls: u32,
    /// Reset the failure count on any closed-state success
    pub reset_on_success: bool,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            success_threshold: 2,
            timeout: Duration::from_secs(30),
            half_open_max_calls: 1,
            reset_on_success: true,
        }
    }
}

/// Observable breaker state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

struct Inner {
    state: CircuitState,
    consecutive_failures: u32,
    consecutive_successes: u32,
    opened_at: Option<Instant>,
    half_open_in_flight: u32,
}

/// Circuit breaker guarding an outbound dependency
pub struct CircuitBreaker {
    config: CircuitBreakerConfig,
    inner: Mutex<Inner>,
}

impl CircuitBreaker {
    /// Create a breaker from a validated configuration
    ///
    /// # Errors
    /// Returns [`InvalidConfiguration`] when a threshold is zero.
    pub fn new(config: CircuitBreakerConfig) -> Result<Self, InvalidConfiguration> {
        if config.failure_threshold == 0 {
            return Err(InvalidConfiguration("failure_threshold must be positive".into()));
        }
        if config.success_threshold == 0 {
            return Err(InvalidConfiguration("success_threshold must be positive".into()));
        }
        if config.half_open_max_calls == 0 {
            return Err(InvalidConfiguration("half_open_max_calls must be positive".into()));
        }

        Ok(Self {
            config,
            inner: Mutex::new(Inner {
                state: CircuitState::Closed,
                consecutive_failures: 0,
                consecutive_successes: 0,
                opened_at: None,
                half_open_in_flight: 0,
            }),
        })
    }

    /// Current state, advancing Open → HalfOpen when the timeout has elapsed
    pub fn state(&self) -> CircuitState {
        let mut inner = self.inner.lock();
        self.advance_if_due(&mut inner);
        inner.state
    }

    /// Execute `operation` under the breaker
    ///
    /// # Errors
    /// Returns [`ResilienceError::CircuitOpen`] without running the operation
    /// while the breaker is open, or [`ResilienceError::OperationFailed`]
    /// wrapping the operation's own error.
    pub async fn execute<F, Fut, T, E>(&self, operation: F) -> Result<T, ResilienceError<E>>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if !self.try_admit() {
            debug!("circuit breaker rejected call while open");
            return Err(ResilienceError::CircuitOpen);
        }

        let result = operation().await;
        match result {
            Ok(value) => {
                self.record_success();
                Ok(value)
            }
            Err(source) => {
                self.record_failure();
                Err(ResilienceError::OperationFailed { source })
            }
        }
    }

    fn try_admit(&self) -> bool {
        let mut inner = self.inner.lock();
        self.advance_if_due(&mut inner);

        match inner.state {
            CircuitState::Closed => true,
            CircuitState::Open => false,
            CircuitState::HalfOpen => {
                if inner.half_open_in_flight < self.config.half_open_max_calls {
                    inner.half_open_in_flight += 1;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn advance_if_due(&self, inner: &mut Inner) {
        if inner.state != CircuitState::Open {
            return;
        }
        let due = inner.opened_at.is_some_and(|at| at.elapsed() >= self.config.timeout);
        if due {
            debug!("circuit breaker transitioning to half-open");
            inner.state = CircuitState::HalfOpen;
            inner.consecutive_successes = 0;
            inner.half_open_in_flight = 0;
        }
    }

    fn record_success(&self) {
        let mut inner = self.inner.lock();
        match inner.state {
            CircuitState::Closed => {
                if self.config.reset_on_success {
                    inner.consecutive_failures = 0;
                }
            }
            CircuitState::HalfOpen => {
                inner.half_open_in_flight = inner.half_open_in_flight.saturating_sub(1);
                inner.consecutive_successes += 1;
                if inner.consecutive_successes >= self.config.success_threshold {
                    debug!("circuit breaker closing after successful probes");
                    inner.state = CircuitState::Closed;
                    inner.consecutive_failures = 0;
                    inner.opened_at = None;
                }
            }
            CircuitState::Open => {}
        }
    }

    fn record_failure(&self) {
        let mut inner = self.inner.lock();
        match inner.state {
            CircuitState::Closed => {
                inner.consecutive_failures += 1;
                if inner.consecutive_failures >= self.config.failure_threshold {
                    warn!(
                        failures = inner.consecutive_failures,
                        "circuit breaker opening after consecutive failures"
                    );
                    inner.state = CircuitState::Open;
                    inner.opened_at = Some(Instant::now());
                }
            }
            CircuitState::HalfOpen => {
                warn!("circuit breaker reopening after failed probe");
                inner.half_open_in_flight = inner.half_open_in_flight.saturating_sub(1);
                inner.state = CircuitState::Open;
                inner.opened_at = Some(Instant::now());
            }
            CircuitState::Open => {}
        }
    }
}
