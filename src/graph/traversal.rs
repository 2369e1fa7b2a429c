use std::collections::{HashSet, VecDeque};

use crate::error::{ScheduleError, ScheduleResult};

use super::schedule::Schedule;
use super::types::{Neighbor, TraversalDirection, Vertex};

impl Schedule {
    /// Breadth-first walk that hands every vertex reachable from `start` to
    /// `visit` exactly once.
    ///
    /// `visit` receives the vertex and the (condition, neighbor) pairs along
    /// `direction`. Returning `false` ends the walk immediately; anything
    /// still queued is discarded.
    pub fn traverse_all<'a, F>(
        &'a self,
        start: &Vertex,
        direction: TraversalDirection,
        mut visit: F,
    ) -> ScheduleResult<()>
    where
        F: FnMut(&'a Vertex, &[Neighbor<'a>]) -> bool,
    {
        if !self.contains_vertex(start) {
            return Err(ScheduleError::UnknownVertex(start.index()));
        }

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        queue.push_back(start.index());

        // A vertex is queued once per incident edge and filtered when dequeued.
        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            let Some(vertex) = self.graph().vertex(current) else {
                continue;
            };

            let neighbors = self.graph().neighbors(current, direction);
            if !visit(vertex, &neighbors) {
                tracing::trace!(vertex = %vertex, "traversal stopped by visitor");
                return Ok(());
            }

            queue.extend(neighbors.iter().map(|n| n.vertex.index()));
        }

        Ok(())
    }

    /// Walk a single path from `start`.
    ///
    /// Each step calls `visit` (stop on `false`), then asks `choose_next` to
    /// pick one of the neighbors along `direction` (stop on `None`). No
    /// visited set is kept: a `choose_next` that keeps selecting an ancestor
    /// loops for as long as it does so.
    pub fn traverse<'a, V, C>(
        &'a self,
        start: &Vertex,
        direction: TraversalDirection,
        mut visit: V,
        mut choose_next: C,
    ) -> ScheduleResult<()>
    where
        V: FnMut(&'a Vertex) -> bool,
        C: FnMut(&[Neighbor<'a>]) -> Option<&'a Vertex>,
    {
        let mut current = self
            .member(start)
            .ok_or(ScheduleError::UnknownVertex(start.index()))?;

        loop {
            if !visit(current) {
                return Ok(());
            }

            let neighbors = self.graph().neighbors(current.index(), direction);
            let Some(next) = choose_next(&neighbors) else {
                return Ok(());
            };
            current = self
                .member(next)
                .ok_or(ScheduleError::UnknownVertex(next.index()))?;
        }
    }

    fn member(&self, vertex: &Vertex) -> Option<&Vertex> {
        self.graph()
            .vertex(vertex.index())
            .filter(|candidate| *candidate == vertex)
    }
}
