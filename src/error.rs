use crate::{Extent, NodeId, Point};

/// Everything that can go wrong while answering a query.
///
/// None of these leave the [`Graph`](crate::Graph) or the [`QuadTree`](crate::QuadTree) in a
/// changed state, so a caller may simply retry with corrected input.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// The request itself is malformed (empty box, non-positive pixel size, ...)
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The query box does not overlap the root extent of the tile pyramid
    #[error("query box {query} lies outside of the mapped area")]
    OutOfBounds {
        /// the offending query box
        query: Extent,
    },

    /// A tile image could not be loaded or decoded
    #[error("tile {name:?} is unavailable: {source}")]
    TileUnavailable {
        /// the quadtree address of the tile
        name: String,
        /// why the tile could not be loaded
        #[source]
        source: image::ImageError,
    },

    /// A quadtree address contains characters other than `1` to `4`
    #[error("invalid quadtree address {0:?}")]
    InvalidAddress(String),

    /// A well-formed quadtree address that goes deeper than the tree
    #[error("no quadtree node at {0:?}")]
    NotFound(String),

    /// A node id that is not part of the graph
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// A node id that was added to the graph twice
    #[error("node {0} already exists")]
    DuplicateNode(NodeId),

    /// A coordinate that is `NaN` or infinite
    #[error("invalid coordinate {0}")]
    InvalidCoordinate(Point),
}

/// Shorthand for results carrying a [`MapError`]
pub type Result<T> = std::result::Result<T, MapError>;
