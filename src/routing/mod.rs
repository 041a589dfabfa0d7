//! Shortest paths over the road [`Graph`](crate::Graph).
//!
//! [`a_star_search`] finds a single route and is what the engine uses. [`dijkstra_search`]
//! searches for several goals at once without a heuristic.

mod route;
pub use route::Route;

mod a_star;
pub use a_star::a_star_search;

mod dijkstra;
pub use dijkstra::dijkstra_search;

use crate::{Graph, NodeId, Result};
use std::cmp::Ordering;

/// The Node ids along the shortest Route from `start` to `goal`, empty if `goal` cannot be
/// reached.
///
/// Shorthand for [`a_star_search`] when the cost is not needed.
pub fn shortest_path(graph: &Graph, start: NodeId, goal: NodeId) -> Result<Vec<NodeId>> {
    Ok(a_star_search(graph, start, goal)?
        .map(Route::into_path)
        .unwrap_or_default())
}

/// A frontier entry ordered by its estimated total cost `f = g + h`, smallest first.
///
/// Fields are the Node, its cost from the start `g` and the estimate `f`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct HeuristicElement(NodeId, f64, f64);
impl Eq for HeuristicElement {}
impl PartialOrd for HeuristicElement {
    fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}
impl Ord for HeuristicElement {
    fn cmp(&self, rhs: &Self) -> Ordering {
        rhs.2.total_cmp(&self.2)
    }
}

/// A frontier entry ordered by its cost from the start, smallest first.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Element(NodeId, f64);
impl Eq for Element {}
impl PartialOrd for Element {
    fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}
impl Ord for Element {
    fn cmp(&self, rhs: &Self) -> Ordering {
        rhs.1.total_cmp(&self.1)
    }
}

/// Walks the predecessor links from `goal` back to `start`.
fn reconstruct<P>(start: NodeId, goal: NodeId, mut prev: P) -> Vec<NodeId>
where
    P: FnMut(NodeId) -> NodeId,
{
    let mut steps = vec![];
    let mut current = goal;

    while current != start {
        steps.push(current);
        current = prev(current);
    }
    steps.push(start);
    steps.reverse();
    steps
}
