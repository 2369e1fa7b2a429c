//! Schedule-level error types.

use thiserror::Error;

use crate::domain::ScheduleId;
use crate::graph::VertexIndex;

/// Misuse of the schedule API.
///
/// Structural defects of a finished schedule are not errors; the verifier
/// reports those through [`IntegrityFailureKind`](crate::verifier::IntegrityFailureKind).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Unknown schedule vertex: {0}")]
    UnknownVertex(VertexIndex),
    #[error("Vertex already exists in the schedule: {0}")]
    VertexAlreadyExists(VertexIndex),
    #[error("No inserts left on vertex: {0}")]
    NoInsertsRemaining(VertexIndex),
    #[error("Vertex is not an insert point: {0}")]
    NotAnInsertPoint(VertexIndex),
    #[error("Cannot create a synchronization block without variables")]
    EmptySynchronizationSet,
    #[error("Cannot create an insert point with less than one insert")]
    NonPositiveInsertCount,
    #[error("Cannot explicitly link the start vertex")]
    CannotExplicitlyLinkStart,
    #[error("Cannot explicitly link the end vertex")]
    CannotExplicitlyLinkEnd,
    #[error("Cannot link a vertex to itself: {0}")]
    SelfLink(VertexIndex),
    #[error("Vertex is not a start vertex: {0}")]
    NotAStartVertex(VertexIndex),
    #[error("Vertex is not an end vertex: {0}")]
    NotAnEndVertex(VertexIndex),
    #[error("Unknown schedule: {0}")]
    UnknownSchedule(ScheduleId),
}
