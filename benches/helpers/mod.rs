pub mod schedule_builders;

use std::collections::HashMap;
use std::sync::Arc;

use xschedule::{Schedule, ScheduleId};

pub type Repository = HashMap<ScheduleId, Arc<Schedule>>;

/// A chain of `depth` schedules, each calling the next, the last calling the first.
pub fn sub_schedule_ring(depth: usize) -> (ScheduleId, Repository) {
    let ids: Vec<ScheduleId> = (0..depth).map(|_| ScheduleId::new()).collect();
    let mut repository = Repository::new();
    for (i, id) in ids.iter().enumerate() {
        let next = ids[(i + 1) % depth];
        repository.insert(*id, Arc::new(schedule_builders::build_calling(next)));
    }
    (ids[0], repository)
}
