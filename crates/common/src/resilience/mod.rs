//! Resilience primitives for outbound calls
//!
//! The remote store is the only external collaborator; every call to it goes
//! through a [`CircuitBreaker`] so a flapping backend degrades into fast,
//! user-visible failures instead of piled-up timeouts.

mod circuit_breaker;

pub use circuit_breaker::{
    CircuitBreaker, CircuitBreakerConfig, CircuitState, InvalidConfiguration, ResilienceError,
};
