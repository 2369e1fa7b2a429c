use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::ScheduleId;
use crate::graph::Schedule;

/// Read-only schedule lookup consumed by the verifier.
///
/// Implementations must answer consistently for the duration of a single
/// verification: an id reported by [`contains`](Self::contains) must also be
/// returned by [`get`](Self::get).
pub trait ScheduleRepository {
    fn contains(&self, id: &ScheduleId) -> bool;

    fn get(&self, id: &ScheduleId) -> Option<Arc<Schedule>>;
}

impl ScheduleRepository for HashMap<ScheduleId, Arc<Schedule>> {
    fn contains(&self, id: &ScheduleId) -> bool {
        self.contains_key(id)
    }

    fn get(&self, id: &ScheduleId) -> Option<Arc<Schedule>> {
        HashMap::get(self, id).cloned()
    }
}

impl<T: ScheduleRepository + ?Sized> ScheduleRepository for Arc<T> {
    fn contains(&self, id: &ScheduleId) -> bool {
        (**self).contains(id)
    }

    fn get(&self, id: &ScheduleId) -> Option<Arc<Schedule>> {
        (**self).get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ScheduleBuilder;

    #[test]
    fn test_hash_map_repository() {
        let id = ScheduleId::new();
        let mut map = HashMap::new();
        map.insert(id, Arc::new(ScheduleBuilder::new().build()));

        assert!(ScheduleRepository::contains(&map, &id));
        assert!(ScheduleRepository::get(&map, &id).is_some());
        assert!(!ScheduleRepository::contains(&map, &ScheduleId::new()));
        assert!(ScheduleRepository::get(&map, &ScheduleId::new()).is_none());
    }
}
