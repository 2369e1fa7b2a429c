//! # XSchedule: execution schedule graphs
//!
//! `xschedule` models the control flow of an execution engine as a directed
//! graph with one start and one end vertex. It provides:
//!
//! - **Vertex model**: executing actions, sub-schedule calls, synchronization
//!   blocks, history markers and insert points, as a closed [`VertexKind`].
//! - **Builder**: [`ScheduleBuilder`] links vertices, splices vertices into
//!   insert points and issues immutable [`Schedule`] snapshots.
//! - **Traversal**: visit-all breadth-first walks and single-path walks steered
//!   by the caller.
//! - **Verification**: [`ScheduleVerifier`] reports every structural defect,
//!   including sub-schedules that end up calling the schedule being verified.
//!
//! # Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! use xschedule::{ScheduleBuilder, ScheduleElementId, ScheduleId, ScheduleVerifier};
//!
//! let mut builder = ScheduleBuilder::new();
//! let action = builder.add_executing_action(ScheduleElementId::new());
//! builder.link_from_start(&action, None).unwrap();
//! builder.link_to_end(&action, None).unwrap();
//! let schedule = builder.build();
//!
//! let repository: HashMap<ScheduleId, Arc<xschedule::Schedule>> = HashMap::new();
//! let report = ScheduleVerifier::default().verify(ScheduleId::new(), &schedule, &repository);
//! assert!(report.is_valid);
//! ```

pub mod domain;
pub mod error;
pub mod graph;
pub mod storage;
pub mod verifier;

pub use crate::domain::{ScheduleElementId, ScheduleId, VariableRef};
pub use crate::error::{ScheduleError, ScheduleResult};
pub use crate::graph::{
    Edge, Neighbor, RemainingInserts, Schedule, ScheduleBuilder, ScheduleGraph, SpliceResult,
    TraversalDirection, Vertex, VertexIndex, VertexKind,
};
pub use crate::storage::{InMemoryScheduleStore, ScheduleInformation, ScheduleRepository};
pub use crate::verifier::{
    IntegrityFailure, IntegrityFailureKind, ScheduleVerifier, VerificationReport, VerifierConfig,
};
