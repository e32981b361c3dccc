//! Core engine for the Arcanum assessment platform.
//!
//! The crate resolves free-form assessment answers into a classified,
//! cross-referenced result: weighted signal totals, an archetype selected
//! through a three-stage funnel, and a deterministically resolved attribute
//! bundle per axis. Multi-day journeys are gated by a linear state machine,
//! and totals from independent suites are blended into one composite payload.
//!
//! Storage and transport stay outside: hosts supply the repository traits in
//! [`catalog`], [`assessment::repository`], and [`progression::repository`].

pub mod assessment;
pub mod catalog;
pub mod config;
pub mod error;
pub mod progression;
pub mod resolution;
pub mod results;
pub mod telemetry;

pub use error::CoreError;
