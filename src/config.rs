use crate::{overlay::RouteStyle, quadtree::DEFAULT_MAX_DEPTH, Extent};

/// The area covered by the root tile of the bundled Berkeley tile set
pub const BERKELEY: Extent = Extent::from_bounds(
    -122.2998046875,
    37.892195547244356,
    -122.2119140625,
    37.82280243352756,
);

/// Options for configuring the [`MapEngine`](crate::MapEngine)
///
/// Default options:
/// ```
/// # use tile_router::{EngineConfig, config::BERKELEY, overlay::RouteStyle};
/// assert_eq!(
///     EngineConfig {
///         root: BERKELEY,
///         max_depth: 7,
///         tile_size: 256,
///         boundary_epsilon: 1e-10,
///         route_style: RouteStyle::default(),
///     },
///     Default::default()
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// The area covered by the root tile (defaults to [`BERKELEY`])
    pub root: Extent,
    /// The depth of the leaf tiles (defaults to `7`, a 128 x 128 grid of leaves)
    pub max_depth: u8,
    /// The edge length of every tile image in pixels (defaults to `256`)
    pub tile_size: u32,
    /// How far, in degrees, the tile walk steps past each tile edge (defaults to `1e-10`).
    ///
    /// Adding up tile widths drifts by a few ulps, which can land a step exactly on, or just
    /// before, the edge it was meant to cross. The nudge must stay far below the width of a
    /// leaf tile.
    pub boundary_epsilon: f64,
    /// How routes are drawn onto rasters
    pub route_style: RouteStyle,
}

impl EngineConfig {
    /// The default config for a tile set covering `root`
    ///
    /// ```
    /// # use tile_router::{EngineConfig, Extent};
    /// let root = Extent::from_bounds(0.0, 1.0, 1.0, 0.0);
    /// let config = EngineConfig::with_root(root);
    ///
    /// assert_eq!(config.root, root);
    /// assert_eq!(config.max_depth, 7);
    /// ```
    pub fn with_root(root: Extent) -> EngineConfig {
        EngineConfig {
            root,
            ..Default::default()
        }
    }

    /// Longitude degrees per pixel of the tiles at `depth`
    pub fn lon_per_pixel(&self, depth: u8) -> f64 {
        self.root.width() / f64::from(self.tile_size) / 2f64.powi(i32::from(depth))
    }

    /// Latitude degrees per pixel of the tiles at `depth`
    pub fn lat_per_pixel(&self, depth: u8) -> f64 {
        self.root.height() / f64::from(self.tile_size) / 2f64.powi(i32::from(depth))
    }
}

impl Default for EngineConfig {
    fn default() -> EngineConfig {
        EngineConfig {
            root: BERKELEY,
            max_depth: DEFAULT_MAX_DEPTH,
            tile_size: 256,
            boundary_epsilon: 1e-10,
            route_style: RouteStyle::default(),
        }
    }
}
