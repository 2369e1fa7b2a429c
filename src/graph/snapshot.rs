use std::collections::{HashMap, HashSet, VecDeque};

use super::schedule_graph::ScheduleGraph;
use super::types::{Edge, Vertex, VertexIndex};

/// An independently owned copy of a graph together with the images of its
/// start and end vertices.
pub(crate) struct Snapshot {
    pub graph: ScheduleGraph,
    pub start: Vertex,
    pub end: Vertex,
}

struct Copier {
    graph: ScheduleGraph,
    images: HashMap<VertexIndex, Vertex>,
}

impl Copier {
    fn image_of(&mut self, vertex: &Vertex) -> Vertex {
        if let Some(image) = self.images.get(&vertex.index()) {
            return image.clone();
        }

        let image = vertex.clone_with_index(VertexIndex::new(self.graph.vertex_count()));
        self.graph.add_vertex(image.clone());
        self.images.insert(vertex.index(), image.clone());
        image
    }
}

/// Copy everything reachable from `start` along out-edges, numbering the
/// copies 0.. in discovery order. The end vertex is always part of the copy,
/// appended last when nothing reaches it.
pub(crate) fn snapshot(source: &ScheduleGraph, start: &Vertex, end: &Vertex) -> Snapshot {
    let mut copier = Copier {
        graph: ScheduleGraph::new(),
        images: HashMap::new(),
    };
    let start_image = copier.image_of(start);

    let mut processed = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(start.index());

    while let Some(current) = queue.pop_front() {
        if !processed.insert(current) {
            continue;
        }

        let (Some(original), Some(image)) = (source.vertex(current), copier.images.get(&current))
        else {
            continue;
        };
        let source_image = image.index();
        for edge in source.out_edges(original) {
            let Some(target) = source.vertex(edge.target) else {
                continue;
            };
            let target_image = copier.image_of(target).index();
            copier.graph.add_edge(Edge::new(
                source_image,
                target_image,
                edge.traversing_condition,
            ));
            queue.push_back(edge.target);
        }
    }

    let end_image = copier.image_of(end);
    tracing::debug!(
        vertices = copier.graph.vertex_count(),
        edges = copier.graph.edge_count(),
        dropped = source.vertex_count().saturating_sub(copier.graph.vertex_count()),
        "schedule graph copied"
    );

    Snapshot {
        graph: copier.graph,
        start: start_image,
        end: end_image,
    }
}
