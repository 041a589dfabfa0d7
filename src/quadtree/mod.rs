//! The tile pyramid as a fixed-depth quadtree.
//!
//! Every node of the tree stands for one pre-rendered tile. A node is addressed by the
//! digits of the quadrants chosen on the way down from the root, so `""` is the root,
//! `"1"` its upper-left child and `"14"` the lower-right child of that one. Tile image files
//! are named after these addresses.

mod quadrant;
pub use quadrant::Quadrant;

use crate::{Extent, MapError, Point, Result};

/// The depth used for the tile pyramid unless configured otherwise
pub const DEFAULT_MAX_DEPTH: u8 = 7;

/// A single tile of the pyramid
#[derive(Clone, Debug)]
pub struct QuadNode {
    key: usize,
    name: String,
    extent: Extent,
    depth: u8,
    children: Option<[usize; 4]>,
}

impl QuadNode {
    /// The arena key of the node, stable for the life of the tree
    pub fn key(&self) -> usize {
        self.key
    }

    /// The address of the node, which is also the name of its tile
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The area covered by the tile
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// The number of levels below the root
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// `true` if the node sits at the maximum depth
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    fn child(&self, quadrant: Quadrant) -> Option<usize> {
        self.children.map(|children| children[quadrant.index()])
    }
}

/// The quadtree over the root extent, built completely up front.
///
/// Nodes live in an arena and refer to their children by key. A tree of depth 7 holds
/// 21845 nodes.
///
/// ## Examples
/// Basic usage:
/// ```
/// use tile_router::{Extent, Point, QuadTree};
///
/// let tree = QuadTree::new(Extent::from_bounds(0.0, 8.0, 8.0, 0.0), 3);
///
/// let name = tree.locate(Point::new(7.5, 0.5), 3);
/// assert_eq!(name, "444");
/// assert_eq!(
///     tree.lookup("444.png").unwrap().extent(),
///     Extent::from_bounds(7.0, 1.0, 8.0, 0.0),
/// );
/// ```
#[derive(Clone, Debug)]
pub struct QuadTree {
    nodes: slab::Slab<QuadNode>,
    root: usize,
    max_depth: u8,
}

impl QuadTree {
    /// Builds the full tree over `root` down to `max_depth`.
    pub fn new(root: Extent, max_depth: u8) -> QuadTree {
        let capacity: usize = (0..=u32::from(max_depth)).map(|d| 4usize.pow(d)).sum();
        let mut nodes = slab::Slab::with_capacity(capacity);
        let root = Self::build(&mut nodes, String::new(), root, 0, max_depth);
        log::debug!(
            "built quadtree with {} nodes down to depth {}",
            nodes.len(),
            max_depth
        );
        QuadTree {
            nodes,
            root,
            max_depth,
        }
    }

    fn build(
        nodes: &mut slab::Slab<QuadNode>,
        name: String,
        extent: Extent,
        depth: u8,
        max_depth: u8,
    ) -> usize {
        let entry = nodes.vacant_entry();
        let key = entry.key();
        entry.insert(QuadNode {
            key,
            name: name.clone(),
            extent,
            depth,
            children: None,
        });

        if depth < max_depth {
            let quadrants = extent.quadrants();
            let mut children = [0; 4];
            for quadrant in Quadrant::all() {
                let mut child_name = name.clone();
                child_name.push(quadrant.digit());
                children[quadrant.index()] = Self::build(
                    nodes,
                    child_name,
                    quadrants[quadrant.index()],
                    depth + 1,
                    max_depth,
                );
            }
            nodes[key].children = Some(children);
        }
        key
    }

    /// The root node
    pub fn root(&self) -> &QuadNode {
        &self.nodes[self.root]
    }

    /// The depth of the leaves
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// The number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`, the tree has at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node by its arena key
    pub fn get(&self, key: usize) -> Option<&QuadNode> {
        self.nodes.get(key)
    }

    /// Finds the node with the address `name`.
    ///
    /// Anything from the first `.` on is ignored, so tile file names like `"1234.png"` are
    /// accepted as well.
    ///
    /// ## Errors
    /// - [`MapError::InvalidAddress`] if `name` contains anything but the digits `1` to `4`
    /// - [`MapError::NotFound`] if `name` is longer than the tree is deep
    pub fn lookup(&self, name: &str) -> Result<&QuadNode> {
        let address = name.split('.').next().unwrap_or_default();

        let mut current = self.root;
        for c in address.chars() {
            let quadrant =
                Quadrant::from_digit(c).ok_or_else(|| MapError::InvalidAddress(name.to_owned()))?;
            current = self.nodes[current]
                .child(quadrant)
                .ok_or_else(|| MapError::NotFound(name.to_owned()))?;
        }
        Ok(&self.nodes[current])
    }

    /// Finds the address of the node at `depth` whose extent contains `point`.
    ///
    /// Extents include their left and top edges but not their right and bottom ones. If
    /// `point` is not inside the root extent the descent stops early, and the returned address
    /// is shorter than `depth`. `depth` is capped at the depth of the tree.
    pub fn locate(&self, point: Point, depth: u8) -> String {
        let depth = depth.min(self.max_depth);
        let mut name = String::with_capacity(usize::from(depth));
        let mut current = &self.nodes[self.root];

        while name.len() < usize::from(depth) {
            let next = Quadrant::all().find_map(|quadrant| {
                let child = &self.nodes[current.child(quadrant)?];
                child.extent.contains(point).then_some((quadrant, child))
            });
            match next {
                Some((quadrant, child)) => {
                    name.push(quadrant.digit());
                    current = child;
                }
                None => break,
            }
        }
        name
    }
}
