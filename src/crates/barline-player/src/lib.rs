//! Reference bar-by-bar driver for barline patterns
//!
//! This crate implements the driver side of the pattern contract without any
//! audio I/O:
//! - Supply the current bar length to patterns through [`Track`]
//! - Evaluate a pattern once per bar, in increasing bar order
//! - Merge and sort each bar's events by position
//! - Stop at the end of the pattern, at an end marker, or loop on request
//! - Keep track of tempo changes as they are dispatched

pub mod config;
pub mod schedule;
pub mod track;

#[cfg(test)]
mod arrangement_tests;

pub use config::TrackConfig;
pub use schedule::{Schedule, ScheduledBar, ScheduledEvent};
pub use track::Track;

/// Re-export common types from barline-core
pub use barline_core::{Event, Measure, Pattern, Timeline, Tracker};

/// Driver errors
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("Invalid bar length: {0}")]
    BarLength(#[from] barline_core::MeasureError),

    #[error("Bar length must be positive, got {0}")]
    NonPositiveBar(Measure),

    #[error("Refusing to render {requested} bars, limit is {limit}")]
    TooManyBars { requested: usize, limit: usize },

    #[error("Failed to serialize schedule: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlayerError>;
