use std::collections::BTreeMap;

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::domain::ScheduleElementId;

use super::types::{Edge, Neighbor, TraversalDirection, Vertex, VertexIndex};

/// Payload stored on every petgraph edge.
#[derive(Debug, Clone)]
struct EdgeWeight {
    condition: Option<ScheduleElementId>,
    // insertion stamp; petgraph hands adjacency out newest first
    sequence: u64,
}

/// Vertex index to petgraph node mapping.
type VertexIndexMap = BTreeMap<VertexIndex, NodeIndex>;

/// Directed multigraph of schedule vertices.
///
/// Backed by a `StableDiGraph` so node handles survive removals. Vertices are
/// enumerated in index order, edges of one vertex in the order they were
/// added. No structural invariant is enforced here, that is the verifier's job.
#[derive(Debug, Clone, Default)]
pub struct ScheduleGraph {
    graph: StableDiGraph<Vertex, EdgeWeight>,
    vertex_index_map: VertexIndexMap,
    next_sequence: u64,
}

impl ScheduleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex. Returns `false` and leaves the graph untouched if a
    /// vertex with the same index is already present.
    pub fn add_vertex(&mut self, vertex: Vertex) -> bool {
        if self.vertex_index_map.contains_key(&vertex.index()) {
            return false;
        }

        let index = vertex.index();
        let node = self.graph.add_node(vertex);
        self.vertex_index_map.insert(index, node);
        true
    }

    /// Remove a vertex and every edge touching it. Unknown vertices are ignored.
    pub fn remove_vertex(&mut self, vertex: &Vertex) -> bool {
        let Some(node) = self.node_of(vertex) else {
            return false;
        };
        self.vertex_index_map.remove(&vertex.index());
        self.graph.remove_node(node).is_some()
    }

    /// Add an edge. Returns `false` if either endpoint is not in the graph.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        let (Some(&source), Some(&target)) = (
            self.vertex_index_map.get(&edge.source),
            self.vertex_index_map.get(&edge.target),
        ) else {
            return false;
        };

        let weight = EdgeWeight {
            condition: edge.traversing_condition,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.graph.add_edge(source, target, weight);
        true
    }

    /// True if this exact vertex (index and kind) is a member of the graph.
    pub fn contains_vertex(&self, vertex: &Vertex) -> bool {
        self.node_of(vertex).is_some()
    }

    pub fn contains_index(&self, index: VertexIndex) -> bool {
        self.vertex_index_map.contains_key(&index)
    }

    pub fn vertex(&self, index: VertexIndex) -> Option<&Vertex> {
        let node = *self.vertex_index_map.get(&index)?;
        self.graph.node_weight(node)
    }

    /// Out-edges of `vertex`, in the order they were added.
    pub fn out_edges(&self, vertex: &Vertex) -> Vec<Edge> {
        self.node_of(vertex)
            .map(|node| self.edges_directed(node, Direction::Outgoing))
            .unwrap_or_default()
    }

    /// In-edges of `vertex`, in the order they were added.
    pub fn in_edges(&self, vertex: &Vertex) -> Vec<Edge> {
        self.node_of(vertex)
            .map(|node| self.edges_directed(node, Direction::Incoming))
            .unwrap_or_default()
    }

    pub fn out_degree(&self, vertex: &Vertex) -> usize {
        self.degree(vertex, Direction::Outgoing)
    }

    pub fn in_degree(&self, vertex: &Vertex) -> usize {
        self.degree(vertex, Direction::Incoming)
    }

    /// Vertices in index order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertex_index_map
            .values()
            .filter_map(|node| self.graph.node_weight(*node))
    }

    /// Every edge, grouped by source in vertex index order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.vertex_index_map
            .values()
            .flat_map(|node| self.edges_directed(*node, Direction::Outgoing))
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// The (condition, vertex) pairs one step away from `index`.
    pub(crate) fn neighbors(&self, index: VertexIndex, direction: TraversalDirection) -> Vec<Neighbor<'_>> {
        let Some(&node) = self.vertex_index_map.get(&index) else {
            return Vec::new();
        };

        self.ordered_edges(node, direction.into())
            .into_iter()
            .filter_map(|id| {
                let (source, target) = self.graph.edge_endpoints(id)?;
                let far = match direction {
                    TraversalDirection::Outbound => target,
                    TraversalDirection::Inbound => source,
                };
                Some(Neighbor {
                    condition: self.graph.edge_weight(id)?.condition.as_ref(),
                    vertex: self.graph.node_weight(far)?,
                })
            })
            .collect()
    }

    fn node_of(&self, vertex: &Vertex) -> Option<NodeIndex> {
        let node = *self.vertex_index_map.get(&vertex.index())?;
        match self.graph.node_weight(node) {
            Some(candidate) if candidate == vertex => Some(node),
            _ => None,
        }
    }

    fn degree(&self, vertex: &Vertex, direction: Direction) -> usize {
        self.node_of(vertex)
            .map(|node| self.graph.edges_directed(node, direction).count())
            .unwrap_or(0)
    }

    fn ordered_edges(&self, node: NodeIndex, direction: Direction) -> Vec<EdgeIndex> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(node, direction)
            .map(|edge| (edge.weight().sequence, edge.id()))
            .collect();
        edges.sort_unstable_by_key(|(sequence, _)| *sequence);
        edges.into_iter().map(|(_, id)| id).collect()
    }

    fn edges_directed(&self, node: NodeIndex, direction: Direction) -> Vec<Edge> {
        self.ordered_edges(node, direction)
            .into_iter()
            .filter_map(|id| {
                let (source, target) = self.graph.edge_endpoints(id)?;
                Some(Edge::new(
                    self.graph.node_weight(source)?.index(),
                    self.graph.node_weight(target)?.index(),
                    self.graph.edge_weight(id)?.condition,
                ))
            })
            .collect()
    }
}

impl From<TraversalDirection> for Direction {
    fn from(direction: TraversalDirection) -> Self {
        match direction {
            TraversalDirection::Outbound => Direction::Outgoing,
            TraversalDirection::Inbound => Direction::Incoming,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(i: usize) -> VertexIndex {
        VertexIndex::new(i)
    }

    fn chain() -> (ScheduleGraph, Vertex, Vertex, Vertex) {
        let mut graph = ScheduleGraph::new();
        let start = Vertex::start(idx(0));
        let middle = Vertex::mark_history(idx(1));
        let end = Vertex::end(idx(2));
        graph.add_vertex(start.clone());
        graph.add_vertex(middle.clone());
        graph.add_vertex(end.clone());
        graph.add_edge(Edge::new(start.index(), middle.index(), None));
        graph.add_edge(Edge::new(middle.index(), end.index(), None));
        (graph, start, middle, end)
    }

    #[test]
    fn test_add_vertex_rejects_duplicate_index() {
        let mut graph = ScheduleGraph::new();
        assert!(graph.add_vertex(Vertex::start(idx(0))));
        assert!(!graph.add_vertex(Vertex::end(idx(0))));
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn test_contains_vertex_compares_kind() {
        let mut graph = ScheduleGraph::new();
        graph.add_vertex(Vertex::start(idx(0)));
        assert!(graph.contains_vertex(&Vertex::start(idx(0))));
        assert!(!graph.contains_vertex(&Vertex::end(idx(0))));
        assert!(graph.contains_index(idx(0)));
    }

    #[test]
    fn test_degrees() {
        let (graph, start, middle, end) = chain();
        assert_eq!(graph.out_degree(&start), 1);
        assert_eq!(graph.in_degree(&start), 0);
        assert_eq!(graph.in_degree(&middle), 1);
        assert_eq!(graph.out_degree(&middle), 1);
        assert_eq!(graph.in_degree(&end), 1);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_add_edge_requires_endpoints() {
        let (mut graph, start, _, _) = chain();
        assert!(!graph.add_edge(Edge::new(start.index(), idx(42), None)));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_parallel_edges_are_kept() {
        let (mut graph, _, middle, end) = chain();
        let condition = ScheduleElementId::new();
        graph.add_edge(Edge::new(middle.index(), end.index(), Some(condition)));
        assert_eq!(graph.out_degree(&middle), 2);
        assert_eq!(graph.in_degree(&end), 2);
        assert_eq!(graph.out_edges(&middle)[1].traversing_condition, Some(condition));
    }

    #[test]
    fn test_edges_keep_insertion_order() {
        let mut graph = ScheduleGraph::new();
        let hub = Vertex::mark_history(idx(0));
        graph.add_vertex(hub.clone());
        for i in 1..=4 {
            graph.add_vertex(Vertex::mark_history(idx(i)));
            graph.add_edge(Edge::new(hub.index(), idx(i), None));
        }
        let targets: Vec<_> = graph.out_edges(&hub).iter().map(|e| e.target).collect();
        assert_eq!(targets, vec![idx(1), idx(2), idx(3), idx(4)]);

        let neighbors: Vec<_> = graph
            .neighbors(hub.index(), TraversalDirection::Outbound)
            .iter()
            .map(|n| n.vertex.index())
            .collect();
        assert_eq!(neighbors, targets);
    }

    #[test]
    fn test_inbound_neighbors_point_at_sources() {
        let (graph, start, middle, _) = chain();
        let neighbors = graph.neighbors(middle.index(), TraversalDirection::Inbound);
        assert_eq!(neighbors.len(), 1);
        assert_eq!(neighbors[0].vertex, &start);
        assert_eq!(graph.in_edges(&middle)[0].source, start.index());
    }

    #[test]
    fn test_remove_vertex_drops_incident_edges() {
        let (mut graph, start, middle, end) = chain();
        assert!(graph.remove_vertex(&middle));
        assert!(!graph.contains_vertex(&middle));
        assert_eq!(graph.out_degree(&start), 0);
        assert_eq!(graph.in_degree(&end), 0);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.vertex_count(), 2);
    }

    #[test]
    fn test_remove_vertex_with_self_loop() {
        let (mut graph, start, middle, end) = chain();
        graph.add_edge(Edge::new(middle.index(), middle.index(), None));
        assert_eq!(graph.edge_count(), 3);
        graph.remove_vertex(&middle);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.out_degree(&start), 0);
        assert_eq!(graph.in_degree(&end), 0);
    }

    #[test]
    fn test_remove_unknown_vertex_is_noop() {
        let (mut graph, _, _, _) = chain();
        assert!(!graph.remove_vertex(&Vertex::mark_history(idx(99))));
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_vertices_in_index_order_after_removal() {
        let (mut graph, start, middle, end) = chain();
        graph.remove_vertex(&middle);
        let extra = Vertex::mark_history(idx(7));
        graph.add_vertex(extra.clone());
        let order: Vec<_> = graph.vertices().cloned().collect();
        assert_eq!(order, vec![start, end, extra]);
    }

    #[test]
    fn test_edge_queries_need_exact_vertex() {
        let (graph, _, middle, _) = chain();
        let impostor = Vertex::end(middle.index());
        assert!(graph.out_edges(&impostor).is_empty());
        assert_eq!(graph.in_degree(&impostor), 0);
        assert_eq!(graph.out_degree(&middle), 1);
    }
}
