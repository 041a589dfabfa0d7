use crate::raster::{self, Raster};
use crate::routing::{a_star_search, Route};
use crate::tiles::{TileCache, TileSource};
use crate::{overlay, EngineConfig, Extent, Graph, MapError, NodeId, Point, QuadTree, Result};
use image::RgbaImage;

/// Answers routing and raster queries over one road Graph and one tile pyramid.
///
/// The engine owns everything it needs and is only read while answering queries, apart from
/// the tile cache, which is safe to share. A `&MapEngine` can therefore serve many threads at
/// once.
///
/// ## Examples
/// Basic usage:
/// ```
/// use tile_router::{prelude::*, RgbaImage, Rgba};
///
/// let mut graph = Graph::new();
/// graph.add_node(1, Point::new(0.1, 0.9)).unwrap();
/// graph.add_node(2, Point::new(0.9, 0.9)).unwrap();
/// graph.add_node(3, Point::new(0.9, 0.1)).unwrap();
/// graph.add_way(&[1, 2, 3]).unwrap();
///
/// // every tile is plain white
/// let tiles = |_: &str| -> tile_router::Result<RgbaImage> {
///     Ok(RgbaImage::from_pixel(256, 256, Rgba([255, 255, 255, 255])))
/// };
/// let root = Extent::from_bounds(0.0, 1.0, 1.0, 0.0);
/// let engine = MapEngine::new(graph, tiles, EngineConfig::with_root(root));
///
/// let path = engine.shortest_path(Point::new(0.0, 1.0), Point::new(1.0, 0.0)).unwrap();
/// assert_eq!(path, vec![1, 2, 3]);
///
/// let raster = engine.resolve_raster(&root, 256.0, 256.0).unwrap();
/// assert_eq!(raster.info.depth, 0);
/// assert_eq!(raster.image.dimensions(), (256, 256));
/// ```
pub struct MapEngine<S> {
    graph: Graph,
    tree: QuadTree,
    tiles: TileCache<S>,
    config: EngineConfig,
}

impl<S: TileSource> MapEngine<S> {
    /// Creates an engine over `graph`, reading tiles from `source`.
    ///
    /// The quadtree is built here, down to `config.max_depth`. `graph` is used as given, so
    /// [prune](Graph::prune) it first if it may hold Nodes that are not on any road.
    pub fn new(graph: Graph, source: S, config: EngineConfig) -> MapEngine<S> {
        let tree = QuadTree::new(config.root, config.max_depth);
        log::debug!(
            "engine ready with {} graph nodes and {} tiles over {}",
            graph.node_count(),
            tree.len(),
            config.root
        );
        MapEngine {
            graph,
            tree,
            tiles: TileCache::new(source),
            config,
        }
    }

    /// The road network
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The tile pyramid
    pub fn quadtree(&self) -> &QuadTree {
        &self.tree
    }

    /// The decoded tiles
    pub fn tiles(&self) -> &TileCache<S> {
        &self.tiles
    }

    /// The options the engine was created with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Finds the shortest Route between the Nodes closest to `start` and `end`.
    ///
    /// ## Returns
    /// `Ok(None)` if the Graph is empty or no road connects the two Nodes.
    pub fn route(&self, start: Point, end: Point) -> Result<Option<Route>> {
        for point in [start, end] {
            if !point.is_finite() {
                return Err(MapError::InvalidCoordinate(point));
            }
        }
        let (from, to) = match (self.graph.nearest(start), self.graph.nearest(end)) {
            (Some(from), Some(to)) => (from, to),
            _ => return Ok(None),
        };
        log::debug!("routing {} -> {} between nodes {} and {}", start, end, from, to);
        let route = a_star_search(&self.graph, from, to)?;
        match &route {
            Some(route) => log::debug!("found {} node route of cost {}", route.len(), route.cost),
            None => log::debug!("no road connects nodes {} and {}", from, to),
        }
        Ok(route)
    }

    /// The Node ids along the shortest Route between the Nodes closest to `start` and `end`.
    ///
    /// Empty if there is no such Route.
    pub fn shortest_path(&self, start: Point, end: Point) -> Result<Vec<NodeId>> {
        Ok(self
            .route(start, end)?
            .map(Route::into_path)
            .unwrap_or_default())
    }

    /// Stitches the tiles covering `query` for display at `width` x `height` pixels.
    ///
    /// See [`plan_raster`](raster::plan_raster) for how the tiles are chosen.
    pub fn resolve_raster(&self, query: &Extent, width: f64, height: f64) -> Result<Raster> {
        raster::resolve_raster(&self.tree, &self.tiles, &self.config, query, width, height)
    }

    /// Strokes the Nodes of `path` onto `image`, which covers `extent`.
    ///
    /// Fails before drawing anything with [`MapError::InvalidRequest`] if `extent` is empty
    /// or inverted, and with [`MapError::UnknownNode`] if an id is not in the Graph.
    pub fn draw_route(&self, image: &mut RgbaImage, extent: &Extent, path: &[NodeId]) -> Result<()> {
        if !extent.is_valid() {
            return Err(MapError::InvalidRequest(format!(
                "cannot draw onto the empty or inverted extent {}",
                extent
            )));
        }
        let points = path
            .iter()
            .map(|&id| self.graph.node(id).map(|node| node.point()))
            .collect::<Result<Vec<Point>>>()?;
        overlay::draw_route(image, extent, &points, &self.config.route_style);
        Ok(())
    }

    /// Resolves the raster for `query` and draws the shortest Route from `start` to `end`
    /// on it.
    ///
    /// Returns the raster together with the path drawn, which is empty if there is no Route.
    pub fn raster_with_route(
        &self,
        query: &Extent,
        width: f64,
        height: f64,
        start: Point,
        end: Point,
    ) -> Result<(Raster, Vec<NodeId>)> {
        let mut raster = self.resolve_raster(query, width, height)?;
        let path = self.shortest_path(start, end)?;
        self.draw_route(&mut raster.image, &raster.info.extent, &path)?;
        Ok((raster, path))
    }
}

impl<S> std::fmt::Debug for MapEngine<S> {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        fmt.debug_struct("MapEngine")
            .field("graph_nodes", &self.graph.node_count())
            .field("tiles", &self.tiles)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
