use crate::domain::{ScheduleElementId, ScheduleId, VariableRef};
use crate::error::{ScheduleError, ScheduleResult};

use super::schedule::Schedule;
use super::schedule_graph::ScheduleGraph;
use super::snapshot::snapshot;
use super::types::*;

/// Outcome of splicing a vertex into an insert point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceResult {
    /// Insert point now in front of the spliced vertex, if any inserts remain.
    pub before: Option<Vertex>,
    /// The vertex that took the insert point's place.
    pub vertex: Vertex,
    /// Insert point now behind the spliced vertex, if any inserts remain.
    pub after: Option<Vertex>,
}

/// Mutable authoring API for schedules.
///
/// The graph always holds exactly one start and one end vertex, created
/// together with the builder. [`build`](Self::build) hands out independent
/// snapshots; the builder stays usable afterwards.
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    graph: ScheduleGraph,
    start: Vertex,
    end: Vertex,
    next_index: usize,
}

impl ScheduleBuilder {
    /// A builder holding only the start and end vertex, not yet linked.
    pub fn new() -> Self {
        let mut graph = ScheduleGraph::new();
        let start = Vertex::start(VertexIndex::new(0));
        let end = Vertex::end(VertexIndex::new(1));
        graph.add_vertex(start.clone());
        graph.add_vertex(end.clone());

        Self {
            graph,
            start,
            end,
            next_index: 2,
        }
    }

    /// A builder seeded with a copy of `template`.
    ///
    /// Every vertex reachable from the template's start is cloned with a fresh
    /// index; edges keep their conditions.
    pub fn from_schedule(template: &Schedule) -> Self {
        let copy = snapshot(template.graph(), template.start(), template.end());
        let next_index = copy.graph.vertex_count();

        Self {
            graph: copy.graph,
            start: copy.start,
            end: copy.end,
            next_index,
        }
    }

    pub fn start(&self) -> &Vertex {
        &self.start
    }

    pub fn end(&self) -> &Vertex {
        &self.end
    }

    /// Read access to the graph under construction.
    pub fn graph(&self) -> &ScheduleGraph {
        &self.graph
    }

    pub fn add_executing_action(&mut self, action: ScheduleElementId) -> Vertex {
        let vertex = Vertex::executing_action(self.allocate_index(), action);
        self.push(vertex)
    }

    pub fn add_sub_schedule(&mut self, schedule: ScheduleId) -> Vertex {
        let vertex = Vertex::sub_schedule(self.allocate_index(), schedule);
        self.push(vertex)
    }

    pub fn add_synchronization_start<I>(&mut self, variables: I) -> ScheduleResult<Vertex>
    where
        I: IntoIterator<Item = VariableRef>,
    {
        let vertex = Vertex::synchronization_start(VertexIndex::new(self.next_index), variables)?;
        self.next_index += 1;
        Ok(self.push(vertex))
    }

    /// Close the synchronization block opened by `start_point`.
    ///
    /// Only checks that `start_point` belongs to this schedule; whether the
    /// block is well formed is left to verification.
    pub fn add_synchronization_end(&mut self, start_point: &Vertex) -> ScheduleResult<Vertex> {
        self.ensure_known(start_point)?;
        let vertex = Vertex::synchronization_end(self.allocate_index());
        Ok(self.push(vertex))
    }

    pub fn add_history_marking_point(&mut self) -> Vertex {
        let vertex = Vertex::mark_history(self.allocate_index());
        self.push(vertex)
    }

    /// Add an insert point that accepts `max_inserts` splices, or any number
    /// of them when `None`.
    pub fn add_insert_point(&mut self, max_inserts: Option<u32>) -> ScheduleResult<Vertex> {
        let remaining = RemainingInserts::from_limit(max_inserts)?;
        let vertex = Vertex::from_parts(self.allocate_index(), VertexKind::Insert(remaining));
        Ok(self.push(vertex))
    }

    /// Create a vertex with an index unused by this builder, without adding
    /// it to the graph. Intended for [`insert_in`](Self::insert_in).
    ///
    /// Start and end kinds are rejected, the builder owns the only pair.
    pub fn create_vertex(&mut self, kind: VertexKind) -> ScheduleResult<Vertex> {
        let index = VertexIndex::new(self.next_index);
        let vertex = Vertex::new(index, kind)?;
        ensure_not_terminal_kind(&vertex)?;
        self.next_index += 1;
        Ok(vertex)
    }

    /// Add an edge between two vertices that are neither start nor end.
    pub fn link_to(
        &mut self,
        source: &Vertex,
        target: &Vertex,
        traversing_condition: Option<ScheduleElementId>,
    ) -> ScheduleResult<()> {
        self.ensure_known(source)?;
        self.ensure_not_terminal(source)?;
        self.ensure_known(target)?;
        self.ensure_not_terminal(target)?;
        if source == target {
            return Err(ScheduleError::SelfLink(source.index()));
        }

        self.graph.add_edge(Edge::new(
            source.index(),
            target.index(),
            traversing_condition,
        ));
        Ok(())
    }

    /// Add an edge from the start vertex to `target`.
    pub fn link_from_start(
        &mut self,
        target: &Vertex,
        traversing_condition: Option<ScheduleElementId>,
    ) -> ScheduleResult<()> {
        self.ensure_known(target)?;
        if *target == self.end {
            return Err(ScheduleError::CannotExplicitlyLinkEnd);
        }
        if *target == self.start {
            return Err(ScheduleError::SelfLink(target.index()));
        }

        self.graph.add_edge(Edge::new(
            self.start.index(),
            target.index(),
            traversing_condition,
        ));
        Ok(())
    }

    /// Add an edge from `source` to the end vertex.
    pub fn link_to_end(
        &mut self,
        source: &Vertex,
        traversing_condition: Option<ScheduleElementId>,
    ) -> ScheduleResult<()> {
        self.ensure_known(source)?;
        if *source == self.start {
            return Err(ScheduleError::CannotExplicitlyLinkStart);
        }
        if *source == self.end {
            return Err(ScheduleError::SelfLink(source.index()));
        }

        self.graph.add_edge(Edge::new(
            source.index(),
            self.end.index(),
            traversing_condition,
        ));
        Ok(())
    }

    /// Replace `insert_point` with `vertex`.
    ///
    /// Every edge into the insert point is redirected to the new vertex (or to
    /// a fresh insert point in front of it) and every edge out of the insert
    /// point now leaves from the new vertex (or a fresh insert point behind
    /// it). Fresh insert points are only created while inserts remain; they
    /// carry the decremented count.
    pub fn insert_in(&mut self, insert_point: &Vertex, vertex: Vertex) -> ScheduleResult<SpliceResult> {
        self.ensure_known(insert_point)?;
        let remaining = insert_point
            .remaining_inserts()
            .ok_or(ScheduleError::NotAnInsertPoint(insert_point.index()))?;
        ensure_not_terminal_kind(&vertex)?;
        if self.graph.contains_index(vertex.index()) {
            return Err(ScheduleError::VertexAlreadyExists(vertex.index()));
        }
        if !remaining.has_remaining() {
            return Err(ScheduleError::NoInsertsRemaining(insert_point.index()));
        }

        let inbound = self.graph.in_edges(insert_point);
        let outbound = self.graph.out_edges(insert_point);

        self.next_index = self.next_index.max(vertex.index().get() + 1);
        self.graph.add_vertex(vertex.clone());

        let next = remaining.after_insert();
        let (before, after) = if next.has_remaining() {
            let before = self.fresh_insert_point(next);
            self.graph
                .add_edge(Edge::new(before.index(), vertex.index(), None));

            let after = self.fresh_insert_point(next);
            self.graph
                .add_edge(Edge::new(vertex.index(), after.index(), None));
            (Some(before), Some(after))
        } else {
            (None, None)
        };

        let inbound_target = before.as_ref().unwrap_or(&vertex).index();
        let outbound_source = after.as_ref().unwrap_or(&vertex).index();
        for edge in inbound {
            self.graph.add_edge(Edge::new(
                edge.source,
                inbound_target,
                edge.traversing_condition,
            ));
        }
        for edge in outbound {
            self.graph.add_edge(Edge::new(
                outbound_source,
                edge.target,
                edge.traversing_condition,
            ));
        }

        self.graph.remove_vertex(insert_point);
        tracing::debug!(
            insert_point = %insert_point,
            vertex = %vertex,
            flanked = before.is_some(),
            "vertex spliced into insert point"
        );

        Ok(SpliceResult {
            before,
            vertex,
            after,
        })
    }

    /// Splice a sub-schedule vertex referring to `schedule` into `insert_point`.
    pub fn insert_sub_schedule_in(
        &mut self,
        insert_point: &Vertex,
        schedule: ScheduleId,
    ) -> ScheduleResult<SpliceResult> {
        let vertex = self.create_vertex(VertexKind::SubSchedule(schedule))?;
        self.insert_in(insert_point, vertex)
    }

    /// Take an immutable, independently owned snapshot of the current graph.
    ///
    /// Vertices are renumbered in breadth-first order from the start vertex;
    /// vertices that cannot be reached from the start are left out.
    pub fn build(&self) -> Schedule {
        Schedule::from_snapshot(snapshot(&self.graph, &self.start, &self.end))
    }

    fn allocate_index(&mut self) -> VertexIndex {
        let index = VertexIndex::new(self.next_index);
        self.next_index += 1;
        index
    }

    fn fresh_insert_point(&mut self, remaining: RemainingInserts) -> Vertex {
        let index = self.allocate_index();
        self.push(Vertex::from_parts(index, VertexKind::Insert(remaining)))
    }

    fn push(&mut self, vertex: Vertex) -> Vertex {
        self.graph.add_vertex(vertex.clone());
        vertex
    }

    fn ensure_known(&self, vertex: &Vertex) -> ScheduleResult<()> {
        if self.graph.contains_vertex(vertex) {
            Ok(())
        } else {
            Err(ScheduleError::UnknownVertex(vertex.index()))
        }
    }

    fn ensure_not_terminal(&self, vertex: &Vertex) -> ScheduleResult<()> {
        if *vertex == self.start {
            return Err(ScheduleError::CannotExplicitlyLinkStart);
        }
        if *vertex == self.end {
            return Err(ScheduleError::CannotExplicitlyLinkEnd);
        }
        Ok(())
    }
}

fn ensure_not_terminal_kind(vertex: &Vertex) -> ScheduleResult<()> {
    if vertex.is_start() {
        return Err(ScheduleError::CannotExplicitlyLinkStart);
    }
    if vertex.is_end() {
        return Err(ScheduleError::CannotExplicitlyLinkEnd);
    }
    Ok(())
}

impl Default for ScheduleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&Schedule> for ScheduleBuilder {
    fn from(template: &Schedule) -> Self {
        Self::from_schedule(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_builder_has_only_terminals() {
        let builder = ScheduleBuilder::new();
        assert_eq!(builder.graph().vertex_count(), 2);
        assert!(builder.start().is_start());
        assert!(builder.end().is_end());
        assert_eq!(builder.graph().edge_count(), 0);
    }

    #[test]
    fn test_add_vertices_get_unique_indices() {
        let mut builder = ScheduleBuilder::new();
        let a = builder.add_history_marking_point();
        let b = builder.add_executing_action(ScheduleElementId::new());
        let c = builder.add_sub_schedule(ScheduleId::new());
        assert_eq!(a.index(), VertexIndex::new(2));
        assert_eq!(b.index(), VertexIndex::new(3));
        assert_eq!(c.index(), VertexIndex::new(4));
        assert_eq!(builder.graph().vertex_count(), 5);
    }

    #[test]
    fn test_add_synchronization_start_requires_variables() {
        let mut builder = ScheduleBuilder::new();
        let err = builder.add_synchronization_start(Vec::new()).unwrap_err();
        assert_eq!(err, ScheduleError::EmptySynchronizationSet);
        assert_eq!(builder.graph().vertex_count(), 2);
    }

    #[test]
    fn test_add_synchronization_end_requires_known_start() {
        let mut builder = ScheduleBuilder::new();
        let stranger = Vertex::synchronization_start(
            VertexIndex::new(50),
            vec![VariableRef::new("x")],
        )
        .unwrap();
        assert_eq!(
            builder.add_synchronization_end(&stranger).unwrap_err(),
            ScheduleError::UnknownVertex(VertexIndex::new(50))
        );

        let sync = builder
            .add_synchronization_start(vec![VariableRef::new("x")])
            .unwrap();
        let end = builder.add_synchronization_end(&sync).unwrap();
        assert!(matches!(end.kind(), VertexKind::SynchronizationEnd));
    }

    #[test]
    fn test_create_vertex_rejects_terminal_kinds() {
        let mut builder = ScheduleBuilder::new();
        assert_eq!(
            builder.create_vertex(VertexKind::Start).unwrap_err(),
            ScheduleError::CannotExplicitlyLinkStart
        );
        assert_eq!(
            builder.create_vertex(VertexKind::End).unwrap_err(),
            ScheduleError::CannotExplicitlyLinkEnd
        );
        let marker = builder.create_vertex(VertexKind::MarkHistory).unwrap();
        assert_eq!(marker.index(), VertexIndex::new(2));
    }

    #[test]
    fn test_insert_in_rejects_second_start_or_end() {
        let mut builder = ScheduleBuilder::new();
        let insert = builder.add_insert_point(Some(1)).unwrap();
        builder.link_from_start(&insert, None).unwrap();
        builder.link_to_end(&insert, None).unwrap();

        let extra_start = Vertex::start(VertexIndex::new(60));
        assert_eq!(
            builder.insert_in(&insert, extra_start).unwrap_err(),
            ScheduleError::CannotExplicitlyLinkStart
        );
        let extra_end = Vertex::end(VertexIndex::new(61));
        assert_eq!(
            builder.insert_in(&insert, extra_end).unwrap_err(),
            ScheduleError::CannotExplicitlyLinkEnd
        );

        assert!(builder.graph().contains_vertex(&insert));
        let schedule = builder.build();
        assert_eq!(schedule.vertices().filter(|v| v.is_start()).count(), 1);
        assert_eq!(schedule.vertices().filter(|v| v.is_end()).count(), 1);
    }

    #[test]
    fn test_rejected_synchronization_start_keeps_index() {
        let mut builder = ScheduleBuilder::new();
        assert!(builder.add_synchronization_start(Vec::new()).is_err());
        let sync = builder
            .add_synchronization_start(vec![VariableRef::new("x")])
            .unwrap();
        assert_eq!(sync.index(), VertexIndex::new(2));
    }

    #[test]
    fn test_add_insert_point_rejects_zero() {
        let mut builder = ScheduleBuilder::new();
        assert_eq!(
            builder.add_insert_point(Some(0)).unwrap_err(),
            ScheduleError::NonPositiveInsertCount
        );
    }

    #[test]
    fn test_link_to_rejects_terminals_and_self() {
        let mut builder = ScheduleBuilder::new();
        let a = builder.add_history_marking_point();
        let start = builder.start().clone();
        let end = builder.end().clone();

        assert_eq!(
            builder.link_to(&start, &a, None).unwrap_err(),
            ScheduleError::CannotExplicitlyLinkStart
        );
        assert_eq!(
            builder.link_to(&end, &a, None).unwrap_err(),
            ScheduleError::CannotExplicitlyLinkEnd
        );
        assert_eq!(
            builder.link_to(&a, &start, None).unwrap_err(),
            ScheduleError::CannotExplicitlyLinkStart
        );
        assert_eq!(
            builder.link_to(&a, &end, None).unwrap_err(),
            ScheduleError::CannotExplicitlyLinkEnd
        );
        assert_eq!(
            builder.link_to(&a, &a, None).unwrap_err(),
            ScheduleError::SelfLink(a.index())
        );
        assert_eq!(builder.graph().edge_count(), 0);
    }

    #[test]
    fn test_link_from_start_and_to_end_guard_terminals() {
        let mut builder = ScheduleBuilder::new();
        let start = builder.start().clone();
        let end = builder.end().clone();

        assert_eq!(
            builder.link_from_start(&end, None).unwrap_err(),
            ScheduleError::CannotExplicitlyLinkEnd
        );
        assert_eq!(
            builder.link_from_start(&start, None).unwrap_err(),
            ScheduleError::SelfLink(start.index())
        );
        assert_eq!(
            builder.link_to_end(&start, None).unwrap_err(),
            ScheduleError::CannotExplicitlyLinkStart
        );
        assert_eq!(
            builder.link_to_end(&end, None).unwrap_err(),
            ScheduleError::SelfLink(end.index())
        );
    }

    #[test]
    fn test_insert_in_rejects_non_insert_vertex() {
        let mut builder = ScheduleBuilder::new();
        let marker = builder.add_history_marking_point();
        let vertex = builder.create_vertex(VertexKind::MarkHistory).unwrap();
        assert_eq!(
            builder.insert_in(&marker, vertex).unwrap_err(),
            ScheduleError::NotAnInsertPoint(marker.index())
        );
    }

    #[test]
    fn test_insert_in_rejects_existing_vertex() {
        let mut builder = ScheduleBuilder::new();
        let insert = builder.add_insert_point(None).unwrap();
        let marker = builder.add_history_marking_point();
        assert_eq!(
            builder.insert_in(&insert, marker.clone()).unwrap_err(),
            ScheduleError::VertexAlreadyExists(marker.index())
        );
    }

    #[test]
    fn test_insert_in_rejects_exhausted_insert_point() {
        let mut builder = ScheduleBuilder::new();
        let index = builder.allocate_index();
        let exhausted = Vertex::from_parts(index, VertexKind::Insert(RemainingInserts::Limited(0)));
        builder.push(exhausted.clone());
        let vertex = builder.create_vertex(VertexKind::MarkHistory).unwrap();
        assert_eq!(
            builder.insert_in(&exhausted, vertex).unwrap_err(),
            ScheduleError::NoInsertsRemaining(exhausted.index())
        );
    }

    #[test]
    fn test_insert_in_unknown_insert_point() {
        let mut builder = ScheduleBuilder::new();
        let stranger = Vertex::insert(VertexIndex::new(80), None).unwrap();
        let vertex = builder.create_vertex(VertexKind::MarkHistory).unwrap();
        assert_eq!(
            builder.insert_in(&stranger, vertex).unwrap_err(),
            ScheduleError::UnknownVertex(VertexIndex::new(80))
        );
    }

    #[test]
    fn test_removed_insert_index_is_not_reused() {
        let mut builder = ScheduleBuilder::new();
        let insert = builder.add_insert_point(Some(1)).unwrap();
        builder.link_from_start(&insert, None).unwrap();
        builder.link_to_end(&insert, None).unwrap();
        builder
            .insert_sub_schedule_in(&insert, ScheduleId::new())
            .unwrap();

        assert!(!builder.graph().contains_index(insert.index()));
        let marker = builder.add_history_marking_point();
        assert_ne!(marker.index(), insert.index());
    }

    #[test]
    fn test_caller_supplied_index_advances_counter() {
        let mut builder = ScheduleBuilder::new();
        let insert = builder.add_insert_point(None).unwrap();
        let vertex = Vertex::mark_history(VertexIndex::new(40));
        let splice = builder.insert_in(&insert, vertex).unwrap();
        assert!(splice.before.unwrap().index().get() > 40);
        assert!(splice.after.unwrap().index().get() > 40);
    }
}
