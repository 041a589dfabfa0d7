//! The road network: Nodes, symmetric weighted Edges and adjacency lookup.

mod node;
pub use node::{Edge, Node};

use crate::node_id::*;
use crate::{MapError, NodeId, Point, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

type PointMap<V> = hashbrown::HashMap<Point, V>;

/// The road network the router searches.
///
/// The Graph is filled once by whatever reads the map data and is then [pruned](Graph::prune).
/// After that it is only read, so a shared reference can serve concurrent searches.
///
/// ## Examples
/// Basic usage:
/// ```
/// use tile_router::{Graph, Point};
///
/// let mut graph = Graph::new();
/// graph.add_node(1, Point::new(0.0, 0.0)).unwrap();
/// graph.add_node(2, Point::new(1.0, 0.0)).unwrap();
/// graph.add_node(3, Point::new(5.0, 5.0)).unwrap(); // never part of a road
/// graph.connect(1, 2).unwrap();
///
/// assert_eq!(graph.prune(), 1);
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.neighbors(1).unwrap()[0].weight, 1.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: slab::Slab<Node>,
    keys: NodeIdMap<usize>,
    pos_map: PointMap<NodeId>,
}

impl Graph {
    /// Creates an empty Graph
    pub fn new() -> Graph {
        Graph {
            nodes: slab::Slab::new(),
            keys: node_id_map(),
            pos_map: PointMap::default(),
        }
    }

    /// The number of Nodes in the Graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// `true` if the Graph has no Nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds a Node at `point`.
    ///
    /// Fails if `id` is already taken or `point` is not finite.
    pub fn add_node(&mut self, id: NodeId, point: Point) -> Result<()> {
        if !point.is_finite() {
            return Err(MapError::InvalidCoordinate(point));
        }
        if self.keys.contains_key(&id) {
            return Err(MapError::DuplicateNode(id));
        }
        let key = self.nodes.insert(Node::new(id, point));
        self.keys.insert(id, key);
        self.pos_map.entry(point).or_insert(id);
        Ok(())
    }

    /// Attaches a display name to a Node
    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) -> Result<()> {
        self.node_mut(id)?.set_name(name.into());
        Ok(())
    }

    /// Adds a road segment between `a` and `b`, stored as the two Edges `a -> b` and `b -> a`.
    pub fn connect(&mut self, a: NodeId, b: NodeId) -> Result<()> {
        let a_point = self.node(a)?.point();
        let b_point = self.node(b)?.point();

        self.node_mut(a)?
            .edges
            .push(Edge::between(a, a_point, b, b_point));
        self.node_mut(b)?
            .edges
            .push(Edge::between(b, b_point, a, a_point));
        Ok(())
    }

    /// Connects every pair of consecutive Nodes of a way.
    ///
    /// All ids are checked before anything is connected, so a failing call leaves the Graph
    /// untouched.
    pub fn add_way(&mut self, way: &[NodeId]) -> Result<()> {
        if let Some(&missing) = way.iter().find(|id| !self.keys.contains_key(*id)) {
            return Err(MapError::UnknownNode(missing));
        }
        for pair in way.windows(2) {
            self.connect(pair[0], pair[1])?;
        }
        Ok(())
    }

    /// Removes every Node that is not part of any road segment and returns how many were
    /// removed.
    ///
    /// This does not make the Graph connected. Separate road networks stay separate, and a
    /// search between them simply finds no route.
    pub fn prune(&mut self) -> usize {
        let unused: Vec<usize> = self
            .nodes
            .iter()
            .filter(|(_, node)| !node.used())
            .map(|(key, _)| key)
            .collect();

        for &key in unused.iter() {
            let node = self.nodes.remove(key);
            self.keys.remove(&node.id());
            if self.pos_map.get(&node.point()) == Some(&node.id()) {
                self.pos_map.remove(&node.point());
            }
        }
        log::debug!(
            "pruned {} unused nodes, {} remain",
            unused.len(),
            self.nodes.len()
        );
        unused.len()
    }

    /// Looks up a Node by id
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.keys
            .get(&id)
            .map(|&key| &self.nodes[key])
            .ok_or(MapError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        match self.keys.get(&id) {
            Some(&key) => Ok(&mut self.nodes[key]),
            None => Err(MapError::UnknownNode(id)),
        }
    }

    /// `true` if `id` is part of the Graph
    pub fn contains(&self, id: NodeId) -> bool {
        self.keys.contains_key(&id)
    }

    /// The Edges leaving `id`
    pub fn neighbors(&self, id: NodeId) -> Result<&[Edge]> {
        self.node(id).map(Node::edges)
    }

    /// The Node sitting exactly at `point`. If several share the point, the first one added wins.
    pub fn node_at(&self, point: Point) -> Option<NodeId> {
        self.pos_map.get(&point).copied()
    }

    /// All Nodes carrying the display name `name`
    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.iter().filter(move |node| node.name() == Some(name))
    }

    /// Iterates over all Nodes in the order they were added.
    ///
    /// Nodes added after a [`prune`](Graph::prune) may take over the slots of removed ones.
    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().map(|(_, node)| node)
    }

    /// The id of the Node closest to `point`, or `None` if the Graph is empty.
    ///
    /// This is a plain scan over every Node. If several Nodes are equally close, the one
    /// added first is returned.
    pub fn nearest(&self, point: Point) -> Option<NodeId> {
        #[cfg(feature = "parallel")]
        let closest = (0..self.nodes.capacity())
            .into_par_iter()
            .filter_map(|key| self.nodes.get(key).map(|node| (key, node)))
            .map(|(key, node)| (node.point().distance(point), key, node.id()))
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        #[cfg(not(feature = "parallel"))]
        let closest = self
            .nodes
            .iter()
            .map(|(key, node)| (node.point().distance(point), key, node.id()))
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        closest.map(|(_, _, id)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph {
        let mut graph = Graph::new();
        graph.add_node(10, Point::new(0.0, 0.0)).unwrap();
        graph.add_node(20, Point::new(3.0, 0.0)).unwrap();
        graph.add_node(30, Point::new(3.0, 4.0)).unwrap();
        graph.add_way(&[10, 20, 30, 10]).unwrap();
        graph
    }

    #[test]
    fn edges_are_symmetric() {
        let graph = triangle();

        for node in graph.iter() {
            for edge in node.edges() {
                let back = graph
                    .neighbors(edge.to)
                    .unwrap()
                    .iter()
                    .find(|e| e.to == edge.from)
                    .unwrap();
                let expected = node.point().distance(graph.node(edge.to).unwrap().point());
                assert_eq!(edge.weight, back.weight);
                assert_eq!(edge.weight, expected);
            }
        }
        assert_eq!(graph.neighbors(10).unwrap().len(), 2);
        assert_eq!(graph.neighbors(20).unwrap()[0].weight, 3.0);
    }

    #[test]
    fn prune_keeps_only_used_nodes() {
        let mut graph = triangle();
        graph.add_node(40, Point::new(9.0, 9.0)).unwrap();
        graph.add_node(50, Point::new(8.0, 8.0)).unwrap();

        assert_eq!(graph.prune(), 2);
        assert_eq!(graph.node_count(), 3);
        assert!(graph.iter().all(|node| !node.edges().is_empty()));
        assert!(matches!(graph.node(40), Err(MapError::UnknownNode(40))));
        assert_eq!(graph.node_at(Point::new(9.0, 9.0)), None);
    }

    #[test]
    fn add_way_is_all_or_nothing() {
        let mut graph = triangle();
        graph.add_node(40, Point::new(9.0, 9.0)).unwrap();

        let result = graph.add_way(&[40, 10, 99]);
        assert!(matches!(result, Err(MapError::UnknownNode(99))));
        assert!(!graph.node(40).unwrap().used());
    }

    #[test]
    fn rejects_bad_nodes() {
        let mut graph = triangle();

        assert!(matches!(
            graph.add_node(10, Point::new(1.0, 1.0)),
            Err(MapError::DuplicateNode(10))
        ));
        assert!(matches!(
            graph.add_node(11, Point::new(f64::NAN, 1.0)),
            Err(MapError::InvalidCoordinate(_))
        ));
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn nearest_prefers_first_added_on_ties() {
        let mut graph = Graph::new();
        graph.add_node(7, Point::new(-1.0, 0.0)).unwrap();
        graph.add_node(3, Point::new(1.0, 0.0)).unwrap();
        graph.add_node(5, Point::new(0.0, 4.0)).unwrap();

        assert_eq!(graph.nearest(Point::new(0.0, 0.0)), Some(7));
        assert_eq!(graph.nearest(Point::new(0.9, 0.1)), Some(3));
        assert_eq!(graph.nearest(Point::new(0.0, 3.0)), Some(5));
        assert_eq!(Graph::new().nearest(Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn lookup_by_point_and_name() {
        let mut graph = triangle();
        graph.set_name(30, "Top").unwrap();

        assert_eq!(graph.node_at(Point::new(3.0, 0.0)), Some(20));
        assert_eq!(graph.node_at(Point::new(3.0, 0.5)), None);
        let named: Vec<NodeId> = graph.named("Top").map(Node::id).collect();
        assert_eq!(named, vec![30]);
        assert_eq!(graph.node(30).unwrap().name(), Some("Top"));
        assert!(graph.set_name(99, "Nowhere").is_err());
    }
}
