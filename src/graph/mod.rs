//! Schedule graph model.
//!
//! A [`Schedule`] is an immutable directed graph with one start and one end
//! vertex. Schedules are authored through a [`ScheduleBuilder`] and walked with
//! [`Schedule::traverse_all`] or [`Schedule::traverse`].

pub mod builder;
pub mod schedule;
pub mod schedule_graph;
mod snapshot;
pub mod traversal;
pub mod types;

pub use builder::{ScheduleBuilder, SpliceResult};
pub use schedule::Schedule;
pub use schedule_graph::ScheduleGraph;
pub use types::{Edge, Neighbor, RemainingInserts, TraversalDirection, Vertex, VertexIndex, VertexKind};
