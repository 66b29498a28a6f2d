//! Shared primitive types used across the entire simulation.

/// A simulated year. One tick = one in-game year.
pub type Year = u32;

/// Stable catalog identifier for a policy.
pub type PolicyId = String;

/// Stable catalog identifier for a city event.
pub type EventId = String;

/// The canonical run identifier.
pub type RunId = String;
