use super::{reconstruct, Element, Route};
use crate::{node_id::*, Graph, NodeId, Result};

use std::collections::BinaryHeap;

/// Searches the Graph using [Dijkstra's Algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm).
///
/// This function can be used to search for several Goals and will try to calculate a Route for every provided Goal.
/// It stops as soon as it has the shortest Route to every Goal, or when all reachable Nodes have been expanded.
///
/// ## Returns
/// a Map with all reachable Goal's NodeIds as the Key and the shortest Route to reach that Goal as Value.
/// The first Node in the Route is always the `start` and the last is the corresponding Goal.
/// Fails if `start` or any Goal is not part of the Graph.
pub fn dijkstra_search(
    graph: &Graph,
    start: NodeId,
    goals: &[NodeId],
) -> Result<NodeIdMap<Route>> {
    graph.node(start)?;
    let mut remaining_goals = node_id_set_with_cap(goals.len());
    for &goal in goals {
        graph.node(goal)?;
        remaining_goals.insert(goal);
    }

    let mut visited = node_id_map();
    let mut closed = node_id_set();
    let mut next = BinaryHeap::new();
    next.push(Element(start, 0.0));
    visited.insert(start, (0.0, start));

    let mut goal_costs = node_id_map_with_cap(goals.len());

    while let Some(Element(current_id, cost)) = next.pop() {
        if remaining_goals.is_empty() {
            break;
        }
        if !closed.insert(current_id) {
            continue;
        }
        if remaining_goals.remove(&current_id) {
            goal_costs.insert(current_id, cost);
        }

        for edge in graph.neighbors(current_id)? {
            let other_id = edge.to;
            if closed.contains(&other_id) {
                continue;
            }
            let other_cost = cost + edge.weight;

            let better = visited
                .get(&other_id)
                .map_or(true, |&(prev_cost, _)| prev_cost > other_cost);
            if better {
                visited.insert(other_id, (other_cost, current_id));
                next.push(Element(other_id, other_cost));
            }
        }
    }

    let mut goal_data = node_id_map_with_cap(goal_costs.len());

    for (&goal, &cost) in goal_costs.iter() {
        let steps = reconstruct(start, goal, |id| visited[&id].1);
        goal_data.insert(goal, Route::new(steps, cost));
    }

    Ok(goal_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;

    #[test]
    fn several_goals() {
        // 1 - 2 - 3    4
        let mut graph = Graph::new();
        for id in 1..=4 {
            graph.add_node(id, Point::new(id as f64, 0.0)).unwrap();
        }
        graph.add_way(&[1, 2, 3]).unwrap();

        let routes = dijkstra_search(&graph, 1, &[3, 1, 4]).unwrap();

        assert_eq!(routes.len(), 2);
        assert_eq!(routes[&3], Route::new(vec![1, 2, 3], 2.0));
        assert_eq!(routes[&1], Route::new(vec![1], 0.0));
        assert!(!routes.contains_key(&4));
    }
}
