use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::domain::ScheduleId;
use crate::error::{ScheduleError, ScheduleResult};
use crate::graph::Schedule;

use super::repository::ScheduleRepository;

/// Descriptive metadata stored alongside a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleInformation {
    pub id: ScheduleId,
    pub name: String,
    pub summary: String,
    pub description: String,
}

struct StoredSchedule {
    schedule: Arc<Schedule>,
    information: ScheduleInformation,
}

/// Thread-safe schedule collection.
///
/// Lookups hand out `Arc` clones so no lock is held while a caller walks or
/// verifies a schedule.
#[derive(Default)]
pub struct InMemoryScheduleStore {
    schedules: RwLock<HashMap<ScheduleId, StoredSchedule>>,
}

impl InMemoryScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `schedule` under a freshly generated id.
    pub fn add(
        &self,
        schedule: Schedule,
        name: impl Into<String>,
        summary: impl Into<String>,
        description: impl Into<String>,
    ) -> ScheduleInformation {
        let information = ScheduleInformation {
            id: ScheduleId::new(),
            name: name.into(),
            summary: summary.into(),
            description: description.into(),
        };
        tracing::debug!(schedule = %information.id, name = %information.name, "schedule added");

        self.schedules.write().insert(
            information.id,
            StoredSchedule {
                schedule: Arc::new(schedule),
                information: information.clone(),
            },
        );
        information
    }

    /// Replace the schedule stored under `id`, keeping its information.
    pub fn update(&self, id: ScheduleId, schedule: Schedule) -> ScheduleResult<()> {
        let mut guard = self.schedules.write();
        let Some(stored) = guard.get_mut(&id) else {
            tracing::warn!(schedule = %id, "update of unknown schedule");
            return Err(ScheduleError::UnknownSchedule(id));
        };
        stored.schedule = Arc::new(schedule);
        Ok(())
    }

    /// Remove the schedule stored under `id`. Unknown ids are ignored.
    pub fn remove(&self, id: &ScheduleId) {
        if self.schedules.write().remove(id).is_some() {
            tracing::debug!(schedule = %id, "schedule removed");
        }
    }

    pub fn contains(&self, id: &ScheduleId) -> bool {
        self.schedules.read().contains_key(id)
    }

    pub fn schedule(&self, id: &ScheduleId) -> ScheduleResult<Arc<Schedule>> {
        self.schedules
            .read()
            .get(id)
            .map(|stored| Arc::clone(&stored.schedule))
            .ok_or(ScheduleError::UnknownSchedule(*id))
    }

    pub fn information(&self, id: &ScheduleId) -> Option<ScheduleInformation> {
        self.schedules
            .read()
            .get(id)
            .map(|stored| stored.information.clone())
    }

    pub fn ids(&self) -> Vec<ScheduleId> {
        self.schedules.read().keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.schedules.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.read().is_empty()
    }
}

impl ScheduleRepository for InMemoryScheduleStore {
    fn contains(&self, id: &ScheduleId) -> bool {
        InMemoryScheduleStore::contains(self, id)
    }

    fn get(&self, id: &ScheduleId) -> Option<Arc<Schedule>> {
        self.schedule(id).ok()
    }
}
