use super::{reconstruct, HeuristicElement, Route};
use crate::{node_id::*, Graph, NodeId, Result};

use std::collections::BinaryHeap;

/// Searches the Graph using the [A* Algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm).
///
/// The heuristic is the straight-line distance to `goal`. Since every Edge weight is itself
/// a straight-line distance, the heuristic never overestimates and the returned Route is a
/// shortest one.
///
/// All search state lives in this call. The Graph is only read, so several searches may run
/// on the same Graph at once.
///
/// ## Examples
/// Basic usage:
/// ```
/// # use tile_router::{Graph, Point, routing::a_star_search};
/// // A--B
/// //    |
/// //    C
/// let mut graph = Graph::new();
/// graph.add_node(1, Point::new(0.0, 0.0)).unwrap();
/// graph.add_node(2, Point::new(1.0, 0.0)).unwrap();
/// graph.add_node(3, Point::new(1.0, 1.0)).unwrap();
/// graph.add_way(&[1, 2, 3]).unwrap();
///
/// let route = a_star_search(&graph, 1, 3).unwrap().unwrap();
///
/// assert_eq!(route.path, vec![1, 2, 3]);
/// assert_eq!(route.cost, 2.0);
/// ```
///
/// ## Returns
/// `Ok(None)` if `goal` cannot be reached from `start`, an error if either is not part of
/// the Graph. The first Node in the Route is always `start` and the last is `goal`.
pub fn a_star_search(graph: &Graph, start: NodeId, goal: NodeId) -> Result<Option<Route>> {
    let start_point = graph.node(start)?.point();
    let goal_point = graph.node(goal)?.point();
    if start == goal {
        return Ok(Some(Route::new(vec![start], 0.0)));
    }
    let size_hint = graph.node_count().min(1024);

    let mut visited = node_id_map_with_cap(size_hint);
    let mut closed = node_id_set_with_cap(size_hint);
    let mut next = BinaryHeap::with_capacity(size_hint / 2);
    next.push(HeuristicElement(start, 0.0, start_point.distance(goal_point)));
    visited.insert(start, (0.0, start));

    while let Some(HeuristicElement(current_id, current_cost, _)) = next.pop() {
        // stale entries stay in the heap and are dropped here
        if !closed.insert(current_id) {
            continue;
        }
        if current_id == goal {
            let steps = reconstruct(start, goal, |id| visited[&id].1);
            log::trace!(
                "A* reached {} after closing {} nodes",
                goal,
                closed.len()
            );
            return Ok(Some(Route::new(steps, current_cost)));
        }

        for edge in graph.neighbors(current_id)? {
            let other_id = edge.to;
            if closed.contains(&other_id) {
                continue;
            }
            let other_cost = current_cost + edge.weight;

            let mut needs_visit = true;
            if let Some((prev_cost, prev_id)) = visited.get_mut(&other_id) {
                if *prev_cost > other_cost {
                    *prev_cost = other_cost;
                    *prev_id = current_id;
                } else {
                    needs_visit = false;
                }
            } else {
                visited.insert(other_id, (other_cost, current_id));
            }

            if needs_visit {
                let heuristic = graph.node(other_id)?.point().distance(goal_point);
                next.push(HeuristicElement(
                    other_id,
                    other_cost,
                    other_cost + heuristic,
                ));
            }
        }
    }

    log::trace!("A* exhausted {} nodes without reaching {}", closed.len(), goal);
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MapError, Point};

    // 1 - 2 - 3
    // |       |
    // |       5      6 - 7
    // |     /
    // 4 - -
    fn sample() -> Graph {
        let mut graph = Graph::new();
        for (id, x, y) in [
            (1, 0.0, 2.0),
            (2, 1.0, 2.0),
            (3, 2.0, 2.0),
            (4, 0.0, -1.0),
            (5, 2.0, 0.0),
            (6, 5.0, 0.0),
            (7, 6.0, 0.0),
        ] {
            graph.add_node(id, Point::new(x, y)).unwrap();
        }
        graph.add_way(&[1, 2, 3, 5, 4, 1]).unwrap();
        graph.add_way(&[6, 7]).unwrap();
        graph
    }

    #[test]
    fn basic() {
        let graph = sample();

        let route = a_star_search(&graph, 1, 5).unwrap().unwrap();
        assert_eq!(route.path, vec![1, 2, 3, 5]);
        assert_eq!(route.cost, 4.0);
    }

    #[test]
    fn start_is_goal() {
        let graph = sample();

        let route = a_star_search(&graph, 3, 3).unwrap().unwrap();
        assert_eq!(route.path, vec![3]);
        assert_eq!(route.cost, 0.0);
    }

    #[test]
    fn unreachable_goal() {
        let graph = sample();

        assert_eq!(a_star_search(&graph, 1, 7).unwrap(), None);
    }

    #[test]
    fn unknown_nodes() {
        let graph = sample();

        assert!(matches!(
            a_star_search(&graph, 1, 42),
            Err(MapError::UnknownNode(42))
        ));
        assert!(matches!(
            a_star_search(&graph, 42, 42),
            Err(MapError::UnknownNode(42))
        ));
    }

    #[test]
    fn picks_shorter_of_two_roads() {
        // both roads lead from 1 to 3, the one through 4 is far longer
        let mut graph = Graph::new();
        graph.add_node(1, Point::new(0.0, 0.0)).unwrap();
        graph.add_node(2, Point::new(1.0, 0.1)).unwrap();
        graph.add_node(3, Point::new(2.0, 0.0)).unwrap();
        graph.add_node(4, Point::new(1.0, -5.0)).unwrap();
        graph.add_way(&[1, 2, 3]).unwrap();
        graph.add_way(&[1, 4, 3]).unwrap();

        let route = a_star_search(&graph, 1, 3).unwrap().unwrap();
        assert_eq!(route.path, vec![1, 2, 3]);
        assert!((route.cost - 2.0 * 1.01f64.sqrt()).abs() < 1e-12);
    }
}
