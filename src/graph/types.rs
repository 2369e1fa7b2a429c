use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{ScheduleElementId, ScheduleId, VariableRef};
use crate::error::{ScheduleError, ScheduleResult};

/// Position of a vertex inside its owning graph.
///
/// Unique within one graph only; copying a graph renumbers every vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexIndex(usize);

impl VertexIndex {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How many more times an insert point may be spliced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemainingInserts {
    Unlimited,
    Limited(u32),
}

impl RemainingInserts {
    /// `None` means unlimited; an explicit count must be positive.
    pub fn from_limit(limit: Option<u32>) -> ScheduleResult<Self> {
        match limit {
            None => Ok(RemainingInserts::Unlimited),
            Some(0) => Err(ScheduleError::NonPositiveInsertCount),
            Some(n) => Ok(RemainingInserts::Limited(n)),
        }
    }

    pub fn has_remaining(self) -> bool {
        match self {
            RemainingInserts::Unlimited => true,
            RemainingInserts::Limited(n) => n > 0,
        }
    }

    /// The count carried by the insert points created around a splice.
    pub fn after_insert(self) -> Self {
        match self {
            RemainingInserts::Unlimited => RemainingInserts::Unlimited,
            RemainingInserts::Limited(n) => RemainingInserts::Limited(n.saturating_sub(1)),
        }
    }
}

/// The operation a vertex stands for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VertexKind {
    Start,
    End,
    ExecutingAction(ScheduleElementId),
    SubSchedule(ScheduleId),
    SynchronizationStart(BTreeSet<VariableRef>),
    SynchronizationEnd,
    MarkHistory,
    Insert(RemainingInserts),
}

impl VertexKind {
    /// Short lowercase name of the variant, used in logs and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            VertexKind::Start => "start",
            VertexKind::End => "end",
            VertexKind::ExecutingAction(_) => "executing-action",
            VertexKind::SubSchedule(_) => "sub-schedule",
            VertexKind::SynchronizationStart(_) => "synchronization-start",
            VertexKind::SynchronizationEnd => "synchronization-end",
            VertexKind::MarkHistory => "mark-history",
            VertexKind::Insert(_) => "insert",
        }
    }

    fn validate(&self) -> ScheduleResult<()> {
        match self {
            VertexKind::SynchronizationStart(variables) if variables.is_empty() => {
                Err(ScheduleError::EmptySynchronizationSet)
            }
            VertexKind::Insert(RemainingInserts::Limited(0)) => {
                Err(ScheduleError::NonPositiveInsertCount)
            }
            _ => Ok(()),
        }
    }
}

/// A schedule vertex: an index plus the operation it represents.
///
/// Vertices compare structurally; two vertices with the same kind but
/// different indices are distinct graph members.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Vertex {
    index: VertexIndex,
    kind: VertexKind,
}

impl Vertex {
    /// Create a vertex of any kind, rejecting empty synchronization sets and
    /// zero insert counts.
    pub fn new(index: VertexIndex, kind: VertexKind) -> ScheduleResult<Self> {
        kind.validate()?;
        Ok(Self { index, kind })
    }

    /// Skips validation; callers guarantee the kind came from a valid vertex.
    pub(crate) fn from_parts(index: VertexIndex, kind: VertexKind) -> Self {
        Self { index, kind }
    }

    pub fn start(index: VertexIndex) -> Self {
        Self::from_parts(index, VertexKind::Start)
    }

    pub fn end(index: VertexIndex) -> Self {
        Self::from_parts(index, VertexKind::End)
    }

    pub fn executing_action(index: VertexIndex, action: ScheduleElementId) -> Self {
        Self::from_parts(index, VertexKind::ExecutingAction(action))
    }

    pub fn sub_schedule(index: VertexIndex, schedule: ScheduleId) -> Self {
        Self::from_parts(index, VertexKind::SubSchedule(schedule))
    }

    pub fn synchronization_start<I>(index: VertexIndex, variables: I) -> ScheduleResult<Self>
    where
        I: IntoIterator<Item = VariableRef>,
    {
        Self::new(
            index,
            VertexKind::SynchronizationStart(variables.into_iter().collect()),
        )
    }

    pub fn synchronization_end(index: VertexIndex) -> Self {
        Self::from_parts(index, VertexKind::SynchronizationEnd)
    }

    pub fn mark_history(index: VertexIndex) -> Self {
        Self::from_parts(index, VertexKind::MarkHistory)
    }

    /// `None` creates an insert point that never runs out.
    pub fn insert(index: VertexIndex, max_inserts: Option<u32>) -> ScheduleResult<Self> {
        Ok(Self::from_parts(
            index,
            VertexKind::Insert(RemainingInserts::from_limit(max_inserts)?),
        ))
    }

    /// Same kind and payload, new index.
    pub fn clone_with_index(&self, index: VertexIndex) -> Self {
        let kind = match &self.kind {
            VertexKind::Start => VertexKind::Start,
            VertexKind::End => VertexKind::End,
            VertexKind::ExecutingAction(action) => VertexKind::ExecutingAction(*action),
            VertexKind::SubSchedule(schedule) => VertexKind::SubSchedule(*schedule),
            VertexKind::SynchronizationStart(variables) => {
                VertexKind::SynchronizationStart(variables.clone())
            }
            VertexKind::SynchronizationEnd => VertexKind::SynchronizationEnd,
            VertexKind::MarkHistory => VertexKind::MarkHistory,
            VertexKind::Insert(remaining) => VertexKind::Insert(*remaining),
        };
        Self { index, kind }
    }

    pub fn index(&self) -> VertexIndex {
        self.index
    }

    pub fn kind(&self) -> &VertexKind {
        &self.kind
    }

    pub fn is_start(&self) -> bool {
        matches!(self.kind, VertexKind::Start)
    }

    pub fn is_end(&self) -> bool {
        matches!(self.kind, VertexKind::End)
    }

    /// The remaining insert count, if this is an insert point.
    pub fn remaining_inserts(&self) -> Option<RemainingInserts> {
        match self.kind {
            VertexKind::Insert(remaining) => Some(remaining),
            _ => None,
        }
    }

    /// The referenced schedule, if this is a sub-schedule vertex.
    pub fn sub_schedule_id(&self) -> Option<ScheduleId> {
        match self.kind {
            VertexKind::SubSchedule(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind.name(), self.index)
    }
}

/// Directed edge between two vertices of the same graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: VertexIndex,
    pub target: VertexIndex,
    /// `None` for unconditional edges.
    pub traversing_condition: Option<ScheduleElementId>,
}

impl Edge {
    pub fn new(
        source: VertexIndex,
        target: VertexIndex,
        traversing_condition: Option<ScheduleElementId>,
    ) -> Self {
        Self {
            source,
            target,
            traversing_condition,
        }
    }

    /// The endpoint on the far side when walking in `direction`.
    pub fn far_end(&self, direction: TraversalDirection) -> VertexIndex {
        match direction {
            TraversalDirection::Outbound => self.target,
            TraversalDirection::Inbound => self.source,
        }
    }
}

/// Which edges a traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalDirection {
    /// Follow out-edges, source to target.
    Outbound,
    /// Follow in-edges, target to source.
    Inbound,
}

/// One step available from a vertex during traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor<'a> {
    pub condition: Option<&'a ScheduleElementId>,
    pub vertex: &'a Vertex,
}
