//! Error types for schedule construction, traversal and storage.
//!
//! - [`ScheduleError`]: misuse of the builder, traversal or store API.

pub mod schedule_error;

pub use schedule_error::ScheduleError;

/// Convenience alias for schedule-level results.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
