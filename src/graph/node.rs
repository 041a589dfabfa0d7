use crate::{NodeId, Point};

/// A directed connection between two Nodes.
///
/// Roads are undirected, so every road segment is stored as two Edges, one in each
/// direction. The weight is computed once from the endpoints when the Edge is created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    /// the Node this Edge starts at
    pub from: NodeId,
    /// the Node this Edge leads to
    pub to: NodeId,
    /// the straight-line length of the Edge
    pub weight: f64,
}

impl Edge {
    pub(crate) fn between(from: NodeId, from_point: Point, to: NodeId, to_point: Point) -> Edge {
        Edge {
            from,
            to,
            weight: from_point.distance(to_point),
        }
    }
}

/// A single intersection or way point of the road network.
///
/// Nodes carry no search state. Everything an A* run needs is kept in maps local to that
/// run, so any number of searches may share one [`Graph`](super::Graph).
#[derive(Clone, Debug)]
pub struct Node {
    id: NodeId,
    point: Point,
    name: Option<String>,
    pub(crate) edges: Vec<Edge>,
}

impl Node {
    pub(crate) fn new(id: NodeId, point: Point) -> Node {
        Node {
            id,
            point,
            name: None,
            edges: Vec::new(),
        }
    }

    /// The unique id of the Node
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The location of the Node
    pub fn point(&self) -> Point {
        self.point
    }

    /// The display name, if the map data named this Node
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// `true` if the Node is part of at least one road segment
    pub fn used(&self) -> bool {
        !self.edges.is_empty()
    }

    /// All Edges leaving this Node, in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}
