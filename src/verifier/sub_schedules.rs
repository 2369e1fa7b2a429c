use std::sync::Arc;

use crate::domain::ScheduleId;
use crate::graph::{Schedule, TraversalDirection};
use crate::storage::ScheduleRepository;

use super::config::VerifierConfig;
use super::types::IntegrityFailureKind;
use super::{walk, FailureSink};

/// No sub-schedule reachable from the start vertex may, directly or through
/// its own sub-schedules, execute the schedule identified by `id`.
pub(super) fn no_links_back<R>(
    id: ScheduleId,
    schedule: &Schedule,
    repository: &R,
    config: &VerifierConfig,
    on_failure: &mut FailureSink<'_>,
) -> bool
where
    R: ScheduleRepository + ?Sized,
{
    let mut valid = true;
    walk(
        schedule,
        schedule.start(),
        TraversalDirection::Outbound,
        |vertex, _| {
            let Some(sub_id) = vertex.sub_schedule_id() else {
                return true;
            };

            let Some(sub_schedule) = lookup(repository, &sub_id) else {
                valid = false;
                on_failure(IntegrityFailureKind::UnknownSubSchedule, vertex);
                return !config.stop_on_unknown_sub_schedule;
            };

            if links_to(id, &sub_schedule, repository, config, 1) {
                valid = false;
                on_failure(IntegrityFailureKind::SubScheduleLinksBackToParentSchedule, vertex);
            }
            true
        },
    );
    valid
}

// Every call walks its schedule from scratch; shared descendants are searched
// once per path that leads to them.
fn links_to<R>(
    target: ScheduleId,
    schedule: &Schedule,
    repository: &R,
    config: &VerifierConfig,
    depth: usize,
) -> bool
where
    R: ScheduleRepository + ?Sized,
{
    if let Some(max_depth) = config.max_sub_schedule_depth {
        if depth > max_depth {
            tracing::warn!(
                target_schedule = %target,
                depth,
                max_depth,
                "sub-schedule search depth exceeded, descent stopped"
            );
            return false;
        }
    }

    let mut found = false;
    walk(
        schedule,
        schedule.start(),
        TraversalDirection::Outbound,
        |vertex, _| {
            let Some(sub_id) = vertex.sub_schedule_id() else {
                return true;
            };
            if sub_id == target {
                found = true;
                return false;
            }

            // Unknown nested schedules are the concern of their own verification.
            let Some(sub_schedule) = lookup(repository, &sub_id) else {
                return true;
            };
            if links_to(target, &sub_schedule, repository, config, depth + 1) {
                found = true;
                return false;
            }
            true
        },
    );
    found
}

fn lookup<R>(repository: &R, id: &ScheduleId) -> Option<Arc<Schedule>>
where
    R: ScheduleRepository + ?Sized,
{
    if repository.contains(id) {
        repository.get(id)
    } else {
        None
    }
}
