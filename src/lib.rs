#![warn(
    missing_docs,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

//! Shortest routes over a road network, drawn on top of a pre-tiled map.
//!
//! ## Introduction
//! The map is shown from a pyramid of pre-rendered square tiles. The root tile covers the
//! whole mapped area, and every tile is split into four tiles of the same pixel size one level
//! further down, so each level doubles the detail. The pyramid is kept as a
//! [`QuadTree`], and every tile is named by the quadrants chosen on the way down from the root
//! (`"1"` upper-left, `"2"` upper-right, `"3"` lower-left, `"4"` lower-right).
//!
//! Given a query box and the pixel size it should be shown at, the engine picks the shallowest
//! level whose tiles are at least as detailed as requested, collects the tiles covering the box
//! and stitches them into one image. Tiles are always used whole, so the resulting raster
//! usually covers a little more than the query box. The area actually covered is reported
//! alongside the image.
//!
//! Routes are searched on a [`Graph`] of road intersections using A*. The start and end points
//! of a query are snapped to the closest Nodes first, so any point on the map can be used.
//! A found route can be stroked onto a raster.
//!
//! ## Examples
//! Building the road network:
//! ```
//! use tile_router::{Graph, Point};
//!
//! let mut graph = Graph::new();
//! graph.add_node(1, Point::new(-122.26, 37.87)).unwrap();
//! graph.add_node(2, Point::new(-122.25, 37.87)).unwrap();
//! graph.add_node(3, Point::new(-122.25, 37.86)).unwrap();
//! graph.add_node(4, Point::new(-122.23, 37.85)).unwrap(); // on no road
//! graph.add_way(&[1, 2, 3]).unwrap();
//!
//! // drop everything that cannot be routed through
//! assert_eq!(graph.prune(), 1);
//! ```
//! The Graph has no notion of where its data comes from. Whatever reads the map data adds the
//! Nodes and the ways connecting them, then [prunes](Graph::prune) the Graph once.
//!
//! ### Routing
//! ```
//! # use tile_router::prelude::*;
//! # let mut graph = Graph::new();
//! # graph.add_node(1, Point::new(-122.26, 37.87)).unwrap();
//! # graph.add_node(2, Point::new(-122.25, 37.87)).unwrap();
//! # graph.add_node(3, Point::new(-122.25, 37.86)).unwrap();
//! # graph.add_way(&[1, 2, 3]).unwrap();
//! let engine = MapEngine::new(
//!     graph,
//!     DirectoryTiles::new("img"), // reads img/root.png, img/1.png, img/1423.png, ...
//!     EngineConfig::default(),
//! );
//!
//! let path = engine
//!     .shortest_path(Point::new(-122.261, 37.871), Point::new(-122.249, 37.859))
//!     .unwrap();
//!
//! assert_eq!(path, vec![1, 2, 3]);
//! ```
//!
//! ### Rastering
//! Tiles are loaded through a [`TileSource`]. Any closure returning an image works as well,
//! which is handy for tiles that are not stored as files:
//! ```
//! # use tile_router::{prelude::*, RgbaImage, Rgba};
//! let tiles = |name: &str| -> tile_router::Result<RgbaImage> {
//!     let shade = 255 - 30 * name.len() as u8;
//!     Ok(RgbaImage::from_pixel(256, 256, Rgba([shade, shade, shade, 255])))
//! };
//! let engine = MapEngine::new(Graph::new(), tiles, EngineConfig::default());
//!
//! // the upper-left quarter of the map at 512 x 512 pixels
//! let [query, ..] = engine.config().root.quadrants();
//! let raster = engine.resolve_raster(&query, 512.0, 512.0).unwrap();
//!
//! assert_eq!(raster.info.depth, 2);
//! assert_eq!(raster.info.extent, query);
//! assert_eq!(raster.image.dimensions(), (512, 512));
//! ```
//!
//! ### Configuration
//! The last parameter of [`MapEngine::new`] is an [`EngineConfig`]. The defaults describe the
//! bundled Berkeley tile set:
//! ```
//! use tile_router::{EngineConfig, Extent};
//!
//! let config = EngineConfig {
//!     max_depth: 4,
//!     ..EngineConfig::with_root(Extent::from_bounds(0.0, 1.0, 1.0, 0.0))
//! };
//!
//! assert_eq!(config.lon_per_pixel(4), 1.0 / 256.0 / 16.0);
//! ```

/// The Type used to reference a Node in the road [`Graph`]
pub type NodeId = i64;

mod geometry;
pub use geometry::{Extent, Point};

mod error;
pub use error::{MapError, Result};

pub mod node_id;

mod graph;
pub use graph::{Edge, Graph, Node};

pub mod routing;
pub use routing::Route;

pub mod quadtree;
pub use quadtree::{QuadNode, QuadTree, Quadrant};

pub mod config;
pub use config::EngineConfig;

pub mod overlay;
pub use overlay::RouteStyle;

pub mod tiles;
pub use tiles::{DirectoryTiles, TileCache, TileSource};

pub mod raster;
pub use raster::{Raster, RasterInfo, RasterPlan};

mod engine;
pub use engine::MapEngine;

pub use image::{Rgba, RgbaImage};

/// The most commonly used types, for glob imports
pub mod prelude {
    pub use crate::{
        DirectoryTiles, EngineConfig, Extent, Graph, MapEngine, MapError, NodeId, Point, Route,
        TileSource,
    };
}
