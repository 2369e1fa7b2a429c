//! Identifiers shared by schedules, their vertices and their edges.

pub mod ids;

pub use ids::{ScheduleElementId, ScheduleId, VariableRef};
