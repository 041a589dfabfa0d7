//! Picking and stitching the tiles that cover a query box.
//!
//! Resolving a raster happens in two steps. [`plan_raster`] picks the tile depth and works out
//! the grid of tiles covering the query, without touching any image. [`composite`] then
//! loads those tiles and pastes them into one image. [`resolve_raster`] does both.

use crate::{quadtree::QuadNode, EngineConfig, Extent, MapError, Point, QuadTree, Result};
use crate::tiles::{TileCache, TileSource};
use image::RgbaImage;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a resolved raster covers.
///
/// Tiles are always used whole, so `extent` is usually larger than the query box.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RasterInfo {
    /// the area covered by the raster
    pub extent: Extent,
    /// the width of the raster in pixels
    pub width: u32,
    /// the height of the raster in pixels
    pub height: u32,
    /// the quadtree depth of the tiles used
    pub depth: u8,
}

/// The tiles chosen for a query, row by row from the top.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterPlan {
    /// the extent, pixel size and depth of the raster
    pub info: RasterInfo,
    /// the arena keys of the tiles, `None` where the walk left the root extent
    pub grid: Vec<Vec<Option<usize>>>,
}

impl RasterPlan {
    /// The number of tile columns
    pub fn columns(&self) -> usize {
        self.grid.first().map_or(0, Vec::len)
    }

    /// The number of tile rows
    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    /// The addresses of the planned tiles, `""` for skipped cells
    pub fn names<'a>(&self, tree: &'a QuadTree) -> Vec<Vec<&'a str>> {
        self.grid
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.and_then(|key| tree.get(key)).map_or("", QuadNode::name))
                    .collect()
            })
            .collect()
    }
}

/// A composited raster and what it covers
#[derive(Clone, Debug)]
pub struct Raster {
    /// the stitched tiles
    pub image: RgbaImage,
    /// the extent, pixel size and depth of `image`
    pub info: RasterInfo,
}

/// Picks the depth whose tiles are at least as detailed as `query_lon_per_pixel`.
///
/// Starting at the root, every level halves the degrees per pixel. The first level that is
/// fine enough is used, or the deepest level if none is.
/// ## Examples
/// Basic usage:
/// ```
/// # use tile_router::{raster::select_depth, EngineConfig};
/// let config = EngineConfig::default();
/// let root_ldpp = config.lon_per_pixel(0);
///
/// assert_eq!(select_depth(&config, root_ldpp), 0);
/// assert_eq!(select_depth(&config, root_ldpp / 3.0), 2);
/// assert_eq!(select_depth(&config, root_ldpp / 1e6), 7);
/// ```
pub fn select_depth(config: &EngineConfig, query_lon_per_pixel: f64) -> u8 {
    let mut depth = 0;
    let mut lon_per_pixel = config.lon_per_pixel(0);
    while lon_per_pixel > query_lon_per_pixel && depth < config.max_depth {
        lon_per_pixel /= 2.0;
        depth += 1;
    }
    depth
}

fn validate(config: &EngineConfig, query: &Extent, width: f64, height: f64) -> Result<()> {
    if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
        return Err(MapError::InvalidRequest(format!(
            "raster size must be positive, got {} x {}",
            width, height
        )));
    }
    if !query.is_valid() {
        return Err(MapError::InvalidRequest(format!(
            "query box {} is empty or inverted",
            query
        )));
    }
    if !config.root.intersects(query) {
        return Err(MapError::OutOfBounds { query: *query });
    }
    Ok(())
}

/// Works out which tiles cover `query` when shown at `width` x `height` pixels.
///
/// Parts of `query` outside the root extent are ignored.
///
/// ## Errors
/// - [`MapError::InvalidRequest`] for non-positive sizes and empty or inverted boxes
/// - [`MapError::OutOfBounds`] if `query` does not overlap the root extent
pub fn plan_raster(
    tree: &QuadTree,
    config: &EngineConfig,
    query: &Extent,
    width: f64,
    height: f64,
) -> Result<RasterPlan> {
    validate(config, query, width, height)?;
    let root = config.root;
    let eps = config.boundary_epsilon;

    let query_lon_per_pixel = query.width() / width;
    let query_lat_per_pixel = query.height() / height;
    let depth = select_depth(config, query_lon_per_pixel).min(tree.max_depth());

    let tiles_per_side = 2f64.powi(i32::from(depth));
    let delta_lon = root.width() / tiles_per_side;
    let delta_lat = root.height() / tiles_per_side;

    let start = Point::new(
        query.upper_left.x.max(root.upper_left.x),
        query.upper_left.y.min(root.upper_left.y),
    );
    let top_left_name = tree.locate(start, depth);
    if top_left_name.len() != usize::from(depth) {
        return Err(MapError::OutOfBounds { query: *query });
    }
    let top_left = tree.lookup(&top_left_name)?.extent().upper_left;

    // the top-left tile is always taken, however thin the query
    let mut columns = 0usize;
    let mut lon = top_left.x;
    while columns == 0
        || (lon < query.lower_right.x - eps && lon + delta_lon <= root.lower_right.x + eps)
    {
        columns += 1;
        lon = top_left.x + columns as f64 * delta_lon;
    }
    let mut rows = 0usize;
    let mut lat = top_left.y;
    while rows == 0
        || (lat > query.lower_right.y + eps && lat - delta_lat >= root.lower_right.y - eps)
    {
        rows += 1;
        lat = top_left.y - rows as f64 * delta_lat;
    }

    let grid: Vec<Vec<Option<usize>>> = (0..rows)
        .map(|row| {
            let lat = top_left.y - row as f64 * (delta_lat + eps);
            (0..columns)
                .map(|column| {
                    let lon = top_left.x + column as f64 * (delta_lon + eps);
                    let name = tree.locate(Point::new(lon, lat), depth);
                    if name.len() == usize::from(depth) {
                        tree.lookup(&name).ok().map(QuadNode::key)
                    } else {
                        None
                    }
                })
                .collect()
        })
        .collect();

    let first = grid.first().and_then(|row| row.first().copied().flatten());
    let last = grid.last().and_then(|row| row.last().copied().flatten());
    let (first, last) = match (first.and_then(|k| tree.get(k)), last.and_then(|k| tree.get(k))) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(MapError::OutOfBounds { query: *query }),
    };
    let extent = Extent::new(first.extent().upper_left, last.extent().lower_right);

    let info = RasterInfo {
        extent,
        width: columns as u32 * config.tile_size,
        height: rows as u32 * config.tile_size,
        depth,
    };
    log::debug!(
        "query {} at {:.3e}/{:.3e} deg per pixel resolved to depth {} with {}x{} tiles covering {}",
        query,
        query_lon_per_pixel,
        query_lat_per_pixel,
        depth,
        columns,
        rows,
        extent
    );
    Ok(RasterPlan { info, grid })
}

/// Loads the planned tiles and pastes them into one image.
///
/// Skipped cells stay transparent. A tile that cannot be loaded fails the whole raster,
/// since a map with holes in it would be misleading.
pub fn composite<S: TileSource>(
    plan: &RasterPlan,
    tree: &QuadTree,
    tiles: &TileCache<S>,
    tile_size: u32,
) -> Result<RgbaImage> {
    let cells: Vec<(usize, usize, &QuadNode)> = plan
        .grid
        .iter()
        .enumerate()
        .flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(column, cell)| {
                cell.and_then(|key| tree.get(key))
                    .map(|node| (row, column, node))
            })
        })
        .collect();

    #[cfg(feature = "parallel")]
    let images: Vec<Arc<RgbaImage>> = cells
        .par_iter()
        .map(|(_, _, node)| tiles.image(node))
        .collect::<Result<_>>()?;

    #[cfg(not(feature = "parallel"))]
    let images: Vec<Arc<RgbaImage>> = cells
        .iter()
        .map(|(_, _, node)| tiles.image(node))
        .collect::<Result<_>>()?;

    let mut canvas = RgbaImage::new(plan.info.width, plan.info.height);
    for ((row, column, _), image) in cells.iter().zip(images.iter()) {
        image::imageops::replace(
            &mut canvas,
            &**image,
            *column as i64 * i64::from(tile_size),
            *row as i64 * i64::from(tile_size),
        );
    }
    Ok(canvas)
}

/// Plans and composites the raster for `query` at `width` x `height` pixels.
pub fn resolve_raster<S: TileSource>(
    tree: &QuadTree,
    tiles: &TileCache<S>,
    config: &EngineConfig,
    query: &Extent,
    width: f64,
    height: f64,
) -> Result<Raster> {
    let plan = plan_raster(tree, config, query, width, height)?;
    let image = composite(&plan, tree, tiles, config.tile_size)?;
    Ok(Raster {
        image,
        info: plan.info,
    })
}
