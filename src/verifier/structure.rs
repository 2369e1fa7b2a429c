use std::collections::HashSet;

use crate::graph::{Schedule, TraversalDirection};

use super::types::IntegrityFailureKind;
use super::{walk, FailureSink};

/// The start vertex must have outbound edges and nothing pointing back at it.
pub(super) fn start_shape(schedule: &Schedule, on_failure: &mut FailureSink<'_>) -> bool {
    let start = schedule.start();
    let valid = schedule.in_degree(start) == 0 && schedule.out_degree(start) > 0;
    if !valid {
        on_failure(IntegrityFailureKind::ScheduleIsMissingStart, start);
    }
    valid
}

/// The end vertex must have inbound edges and no way out.
pub(super) fn end_shape(schedule: &Schedule, on_failure: &mut FailureSink<'_>) -> bool {
    let end = schedule.end();
    let valid = schedule.out_degree(end) == 0 && schedule.in_degree(end) > 0;
    if !valid {
        on_failure(IntegrityFailureKind::ScheduleIsMissingEnd, end);
    }
    valid
}

/// No vertex reachable from start may have two edges to the same target.
pub(super) fn edge_multiplicity(schedule: &Schedule, on_failure: &mut FailureSink<'_>) -> bool {
    let mut valid = true;
    walk(
        schedule,
        schedule.start(),
        TraversalDirection::Outbound,
        |vertex, neighbors| {
            let distinct: HashSet<_> = neighbors.iter().map(|n| n.vertex.index()).collect();
            if distinct.len() < neighbors.len() {
                valid = false;
                on_failure(IntegrityFailureKind::VertexLinksToOtherVertexInMultipleWays, vertex);
            }
            true
        },
    );
    valid
}
