//! Multi-source breadth-first search over the board graph.
//!
//! All edges weigh 1, so a plain FIFO search visits vertices in
//! nondecreasing distance order and each vertex can be finalized on
//! first discovery. Sources may carry fractional initial distances,
//! which lets a pursuer mid-transit between two cells treat both its
//! departure and arrival cell as weighted starting points.

use std::collections::{HashMap, VecDeque};

use crate::game::graph::{Graph, Vertex};

/// Distances and parent links produced by [`shortest_paths`].
///
/// A vertex is visited iff it has a distance entry. Distances and
/// parents are final once written: the search relaxes every vertex at
/// most once.
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    dist: HashMap<Vertex, f32>,
    parent: HashMap<Vertex, Vertex>,
}

impl SearchResult {
    /// Whether the search reached this vertex.
    #[must_use]
    pub fn is_visited(&self, vertex: Vertex) -> bool {
        self.dist.contains_key(&vertex)
    }

    /// Distance from the nearest source, if the vertex was reached.
    #[must_use]
    pub fn distance(&self, vertex: Vertex) -> Option<f32> {
        self.dist.get(&vertex).copied()
    }

    /// The vertex this one was discovered from. Sources have no parent.
    #[must_use]
    pub fn parent(&self, vertex: Vertex) -> Option<Vertex> {
        self.parent.get(&vertex).copied()
    }

    /// Reconstruct the discovered path ending at `target`, from the
    /// winning source to the target inclusive. `None` when the target
    /// was never reached — an expected outcome for unreachable cells,
    /// not an error.
    #[must_use]
    pub fn path_to(&self, target: Vertex) -> Option<Vec<Vertex>> {
        if !self.is_visited(target) {
            return None;
        }

        let mut path = vec![target];
        let mut cursor = target;
        while let Some(parent) = self.parent(cursor) {
            path.push(parent);
            cursor = parent;
        }
        path.reverse();
        Some(path)
    }

    fn record_source(&mut self, source: Vertex, offset: f32) {
        // First entry wins when a source repeats.
        self.dist.entry(source).or_insert(offset);
    }

    fn relax(&mut self, from: Vertex, to: Vertex) {
        if let Some(&base) = self.dist.get(&from) {
            self.dist.insert(to, base + 1.0);
            self.parent.insert(to, from);
        }
    }
}

/// Run a multi-source BFS toward `target`.
///
/// The queue is seeded with every source simultaneously; `offsets`
/// supplies per-source initial distances (zero when absent). The search
/// stops early the moment the target is discovered, so the result may
/// cover only part of the graph. Identical inputs always produce
/// identical results: sources are seeded in list order and neighbors
/// expand in the graph's ascending order.
#[must_use]
pub fn shortest_paths(
    graph: &Graph,
    sources: &[Vertex],
    offsets: Option<&[f32]>,
    target: Vertex,
) -> SearchResult {
    let mut result = SearchResult::default();
    let mut queue: VecDeque<Vertex> = VecDeque::with_capacity(sources.len());

    for (index, &source) in sources.iter().enumerate() {
        let offset = offsets
            .and_then(|values| values.get(index))
            .copied()
            .unwrap_or(0.0);
        result.record_source(source, offset);
        queue.push_back(source);
    }

    while !result.is_visited(target) {
        let Some(vertex) = queue.pop_front() else {
            break;
        };
        for neighbor in graph.neighbors(vertex) {
            if !result.is_visited(neighbor) {
                result.relax(vertex, neighbor);
                queue.push_back(neighbor);
                if neighbor == target {
                    break;
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A - B - C in a row.
    fn line_graph() -> (Graph, Vertex, Vertex, Vertex) {
        let a = Vertex::new(0, 0);
        let b = Vertex::new(1, 0);
        let c = Vertex::new(2, 0);
        let mut graph = Graph::new();
        graph.add_edge(a, b);
        graph.add_edge(b, c);
        (graph, a, b, c)
    }

    #[test]
    fn test_line_graph_distances_and_parents() {
        let (graph, a, b, c) = line_graph();
        let result = shortest_paths(&graph, &[a], None, c);

        assert_eq!(result.distance(c), Some(2.0));
        assert_eq!(result.parent(c), Some(b));
        assert_eq!(result.parent(b), Some(a));
        assert_eq!(result.parent(a), None);
        assert_eq!(result.path_to(c), Some(vec![a, b, c]));
    }

    #[test]
    fn test_unreachable_target_is_absent() {
        let (graph, a, ..) = line_graph();
        let island = Vertex::new(9, 9);
        let result = shortest_paths(&graph, &[a], None, island);

        assert!(!result.is_visited(island));
        assert_eq!(result.path_to(island), None);
        // The rest of the component was still explored.
        assert!(result.is_visited(Vertex::new(2, 0)));
    }

    #[test]
    fn test_transit_weighted_sources() {
        // Pursuer 40% of the way from (5,5) to (6,5); the player sits
        // on (6,5). Departure carries the remaining distance, arrival
        // the progress already made.
        let departure = Vertex::new(5, 5);
        let arrival = Vertex::new(6, 5);
        let mut graph = Graph::new();
        graph.add_edge(departure, arrival);

        let result = shortest_paths(&graph, &[departure, arrival], Some(&[0.6, 0.4]), arrival);

        assert_eq!(result.distance(arrival), Some(0.4));
        assert_eq!(result.distance(departure), Some(0.6));
        assert_eq!(result.parent(arrival), None);
    }

    #[test]
    fn test_offsets_default_to_zero() {
        let (graph, a, b, _) = line_graph();
        let result = shortest_paths(&graph, &[a], Some(&[]), b);
        assert_eq!(result.distance(a), Some(0.0));
        assert_eq!(result.distance(b), Some(1.0));
    }

    #[test]
    fn test_monotone_distances() {
        let mut graph = Graph::new();
        // 4x4 open block.
        for y in 0..4 {
            for x in 0..4 {
                if x + 1 < 4 {
                    graph.add_edge(Vertex::new(x, y), Vertex::new(x + 1, y));
                }
                if y + 1 < 4 {
                    graph.add_edge(Vertex::new(x, y), Vertex::new(x, y + 1));
                }
            }
        }

        let source = Vertex::new(0, 0);
        let target = Vertex::new(3, 3);
        let result = shortest_paths(&graph, &[source], None, target);

        for y in 0..4 {
            for x in 0..4 {
                let vertex = Vertex::new(x, y);
                let Some(parent) = result.parent(vertex) else {
                    continue;
                };
                let (Some(d), Some(pd)) = (result.distance(vertex), result.distance(parent))
                else {
                    continue;
                };
                assert!((d - pd - 1.0).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_deterministic_across_runs() {
        let (graph, a, _, c) = line_graph();
        let first = shortest_paths(&graph, &[a], None, c);
        let second = shortest_paths(&graph, &[a], None, c);

        for vertex in [a, Vertex::new(1, 0), c] {
            assert_eq!(first.distance(vertex), second.distance(vertex));
            assert_eq!(first.parent(vertex), second.parent(vertex));
        }
    }

    #[test]
    fn test_target_equal_to_source_terminates_immediately() {
        let (graph, a, b, _) = line_graph();
        let result = shortest_paths(&graph, &[a], None, a);
        assert_eq!(result.distance(a), Some(0.0));
        // Early exit: nothing beyond the seed was expanded.
        assert!(!result.is_visited(b));
    }
}
