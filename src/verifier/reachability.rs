use std::collections::HashSet;

use crate::graph::{Schedule, TraversalDirection, Vertex};

use super::types::IntegrityFailureKind;
use super::{walk, FailureSink};

/// Every vertex must be reachable from the start vertex.
pub(super) fn forward(schedule: &Schedule, on_failure: &mut FailureSink<'_>) -> bool {
    report_unreached(
        schedule,
        schedule.start(),
        TraversalDirection::Outbound,
        IntegrityFailureKind::ScheduleVertexIsNotReachableFromStart,
        on_failure,
    )
}

/// The end vertex must be reachable from every vertex.
pub(super) fn backward(schedule: &Schedule, on_failure: &mut FailureSink<'_>) -> bool {
    report_unreached(
        schedule,
        schedule.end(),
        TraversalDirection::Inbound,
        IntegrityFailureKind::ScheduleEndIsNotReachableFromVertex,
        on_failure,
    )
}

fn report_unreached(
    schedule: &Schedule,
    from: &Vertex,
    direction: TraversalDirection,
    kind: IntegrityFailureKind,
    on_failure: &mut FailureSink<'_>,
) -> bool {
    let mut visited = HashSet::new();
    walk(schedule, from, direction, |vertex, _| {
        visited.insert(vertex.index());
        true
    });

    let mut valid = true;
    for vertex in schedule.vertices().filter(|v| !visited.contains(&v.index())) {
        valid = false;
        on_failure(kind, vertex);
    }
    valid
}
