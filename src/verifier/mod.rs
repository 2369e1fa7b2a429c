//! Structural verification of schedules.
//!
//! [`ScheduleVerifier`] runs a fixed sequence of independent checks and
//! reports every defect it finds instead of stopping at the first one:
//!
//! 1. start shape
//! 2. end shape
//! 3. forward reachability from start
//! 4. backward reachability from end
//! 5. edge multiplicity
//! 6. sub-schedules linking back to the verified schedule
//!
//! Pairing of synchronization blocks and variable updates inside them are not
//! verified.

pub mod config;
mod reachability;
mod structure;
mod sub_schedules;
pub mod types;

use crate::domain::ScheduleId;
use crate::graph::{Neighbor, Schedule, TraversalDirection, Vertex};
use crate::storage::ScheduleRepository;

pub use config::VerifierConfig;
pub use types::{IntegrityFailure, IntegrityFailureKind, VerificationReport};

pub(crate) type FailureSink<'a> = dyn FnMut(IntegrityFailureKind, &Vertex) + 'a;

/// Checks schedules for structural defects.
#[derive(Debug, Clone, Default)]
pub struct ScheduleVerifier {
    config: VerifierConfig,
}

impl ScheduleVerifier {
    pub fn new(config: VerifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Run every check against `schedule`, which is stored in `repository`
    /// under `id`.
    ///
    /// `on_failure` is invoked once per defect; the result is `true` only when
    /// it was never invoked.
    pub fn is_valid<R, F>(
        &self,
        id: ScheduleId,
        schedule: &Schedule,
        repository: &R,
        mut on_failure: F,
    ) -> bool
    where
        R: ScheduleRepository + ?Sized,
        F: FnMut(IntegrityFailureKind, &Vertex),
    {
        let mut report = |kind: IntegrityFailureKind, vertex: &Vertex| {
            tracing::debug!(
                schedule = %id,
                code = kind.code(),
                vertex = %vertex,
                "{}",
                kind
            );
            on_failure(kind, vertex);
        };
        let sink: &mut FailureSink<'_> = &mut report;

        let mut result = structure::start_shape(schedule, sink);
        result &= structure::end_shape(schedule, sink);
        result &= reachability::forward(schedule, sink);
        result &= reachability::backward(schedule, sink);
        result &= structure::edge_multiplicity(schedule, sink);
        result &= sub_schedules::no_links_back(id, schedule, repository, &self.config, sink);
        result
    }

    /// Like [`is_valid`](Self::is_valid), collecting the failures instead of
    /// handing them to a callback.
    pub fn verify<R>(&self, id: ScheduleId, schedule: &Schedule, repository: &R) -> VerificationReport
    where
        R: ScheduleRepository + ?Sized,
    {
        let mut failures = Vec::new();
        let is_valid = self.is_valid(id, schedule, repository, |kind, vertex| {
            failures.push(IntegrityFailure {
                kind,
                vertex: vertex.clone(),
            });
        });

        VerificationReport { is_valid, failures }
    }
}

/// Visit-all walk over a schedule whose terminals are always members.
fn walk<'a, F>(schedule: &'a Schedule, from: &Vertex, direction: TraversalDirection, visit: F)
where
    F: FnMut(&'a Vertex, &[Neighbor<'a>]) -> bool,
{
    // `Schedule::new` and snapshots both guarantee the terminals are members.
    let result = schedule.traverse_all(from, direction, visit);
    debug_assert!(result.is_ok(), "verifier walk started outside the schedule");
    if let Err(err) = result {
        tracing::warn!(error = %err, "schedule traversal failed");
    }
}
