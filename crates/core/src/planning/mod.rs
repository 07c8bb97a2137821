//! Planning view: fetch, normalize, aggregate

pub mod ports;
pub mod service;

pub use service::{PlanSnapshot, PlanningService};
