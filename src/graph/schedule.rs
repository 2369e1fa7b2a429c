use crate::error::{ScheduleError, ScheduleResult};

use super::schedule_graph::ScheduleGraph;
use super::snapshot::Snapshot;
use super::types::{Edge, Vertex, VertexIndex, VertexKind};

/// Immutable schedule: a graph with one designated start and one end vertex.
///
/// Nothing mutates a schedule once created, so it can be shared freely
/// across threads (typically behind an `Arc`).
#[derive(Debug, Clone)]
pub struct Schedule {
    graph: ScheduleGraph,
    start: Vertex,
    end: Vertex,
}

impl Schedule {
    /// Wrap an already assembled graph without copying it.
    ///
    /// Unlike [`ScheduleBuilder`](super::ScheduleBuilder) this accepts any
    /// shape, including edges into the start vertex, so that defective
    /// schedules can be represented and handed to the verifier.
    pub fn new(graph: ScheduleGraph, start: Vertex, end: Vertex) -> ScheduleResult<Self> {
        if !graph.contains_vertex(&start) {
            return Err(ScheduleError::UnknownVertex(start.index()));
        }
        if !start.is_start() {
            return Err(ScheduleError::NotAStartVertex(start.index()));
        }
        if !graph.contains_vertex(&end) {
            return Err(ScheduleError::UnknownVertex(end.index()));
        }
        if !end.is_end() {
            return Err(ScheduleError::NotAnEndVertex(end.index()));
        }

        Ok(Self { graph, start, end })
    }

    pub(crate) fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            graph: snapshot.graph,
            start: snapshot.start,
            end: snapshot.end,
        }
    }

    pub fn start(&self) -> &Vertex {
        &self.start
    }

    pub fn end(&self) -> &Vertex {
        &self.end
    }

    pub fn graph(&self) -> &ScheduleGraph {
        &self.graph
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.graph.vertices()
    }

    pub fn vertex(&self, index: VertexIndex) -> Option<&Vertex> {
        self.graph.vertex(index)
    }

    pub fn contains_vertex(&self, vertex: &Vertex) -> bool {
        self.graph.contains_vertex(vertex)
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn out_edges(&self, vertex: &Vertex) -> Vec<Edge> {
        self.graph.out_edges(vertex)
    }

    pub fn in_edges(&self, vertex: &Vertex) -> Vec<Edge> {
        self.graph.in_edges(vertex)
    }

    /// Number of edges arriving at `vertex`.
    pub fn in_degree(&self, vertex: &Vertex) -> usize {
        self.graph.in_degree(vertex)
    }

    /// Number of edges leaving `vertex`.
    pub fn out_degree(&self, vertex: &Vertex) -> usize {
        self.graph.out_degree(vertex)
    }

    /// All insert points still present in the schedule.
    pub fn insert_points(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.graph
            .vertices()
            .filter(|v| matches!(v.kind(), VertexKind::Insert(_)))
    }
}
