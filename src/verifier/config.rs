use serde::{Deserialize, Serialize};

/// Tuning knobs for [`ScheduleVerifier`](super::ScheduleVerifier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// How deep the search for sub-schedules linking back to the verified
    /// schedule may descend. `None` means unbounded.
    #[serde(default)]
    pub max_sub_schedule_depth: Option<usize>,
    /// Stop scanning the verified schedule's sub-schedules after the first
    /// one that is missing from the repository.
    #[serde(default = "default_stop_on_unknown_sub_schedule")]
    pub stop_on_unknown_sub_schedule: bool,
}

fn default_stop_on_unknown_sub_schedule() -> bool {
    true
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            max_sub_schedule_depth: None,
            stop_on_unknown_sub_schedule: default_stop_on_unknown_sub_schedule(),
        }
    }
}
