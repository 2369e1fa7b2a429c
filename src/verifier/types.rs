//! Integrity failure types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::Vertex;

/// Kind of structural defect found in a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntegrityFailureKind {
    ScheduleIsMissingStart,
    ScheduleIsMissingEnd,
    ScheduleVertexIsNotReachableFromStart,
    ScheduleEndIsNotReachableFromVertex,
    VertexLinksToOtherVertexInMultipleWays,
    UnknownSubSchedule,
    SubScheduleLinksBackToParentSchedule,
}

impl IntegrityFailureKind {
    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ScheduleIsMissingStart => "E201",
            Self::ScheduleIsMissingEnd => "E202",
            Self::ScheduleVertexIsNotReachableFromStart => "E203",
            Self::ScheduleEndIsNotReachableFromVertex => "E204",
            Self::VertexLinksToOtherVertexInMultipleWays => "E205",
            Self::UnknownSubSchedule => "E206",
            Self::SubScheduleLinksBackToParentSchedule => "E207",
        }
    }
}

impl fmt::Display for IntegrityFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::ScheduleIsMissingStart => "Start vertex has inbound edges or no outbound edges",
            Self::ScheduleIsMissingEnd => "End vertex has outbound edges or no inbound edges",
            Self::ScheduleVertexIsNotReachableFromStart => "Vertex is not reachable from start",
            Self::ScheduleEndIsNotReachableFromVertex => "End is not reachable from vertex",
            Self::VertexLinksToOtherVertexInMultipleWays => {
                "Vertex links to another vertex through more than one edge"
            }
            Self::UnknownSubSchedule => "Sub-schedule is not known to the repository",
            Self::SubScheduleLinksBackToParentSchedule => {
                "Sub-schedule links back to the schedule being verified"
            }
        };
        f.write_str(message)
    }
}

/// A single defect together with the vertex it was found at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityFailure {
    pub kind: IntegrityFailureKind,
    pub vertex: Vertex,
}

impl fmt::Display for IntegrityFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind.code(), self.kind, self.vertex)
    }
}

/// Every defect found by one verification pass, in report order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    pub is_valid: bool,
    pub failures: Vec<IntegrityFailure>,
}

impl VerificationReport {
    /// Failures of a single kind.
    pub fn failures_of(&self, kind: IntegrityFailureKind) -> Vec<&IntegrityFailure> {
        self.failures.iter().filter(|f| f.kind == kind).collect()
    }
}
