//! Loading tile images and keeping them around once decoded.

use crate::{quadtree::QuadNode, MapError, Result};
use dashmap::DashMap;
use image::RgbaImage;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where tile images come from.
///
/// `name` is the quadtree address of the tile, `""` for the root. Any
/// `Fn(&str) -> Result<RgbaImage>` closure is a TileSource as well.
pub trait TileSource: Send + Sync {
    /// Loads and decodes the tile called `name`
    fn load(&self, name: &str) -> Result<RgbaImage>;
}

impl<F> TileSource for F
where
    F: Fn(&str) -> Result<RgbaImage> + Send + Sync,
{
    fn load(&self, name: &str) -> Result<RgbaImage> {
        self(name)
    }
}

/// Reads tiles from PNG files in one directory: `<dir>/<name>.png`, and `<dir>/root.png`
/// for the root tile.
#[derive(Clone, Debug)]
pub struct DirectoryTiles {
    dir: PathBuf,
}

impl DirectoryTiles {
    /// Creates a source reading from `dir`
    pub fn new(dir: impl AsRef<Path>) -> DirectoryTiles {
        DirectoryTiles {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// The file the tile `name` is read from
    pub fn path_of(&self, name: &str) -> PathBuf {
        let stem = if name.is_empty() { "root" } else { name };
        self.dir.join(format!("{}.png", stem))
    }
}

impl TileSource for DirectoryTiles {
    fn load(&self, name: &str) -> Result<RgbaImage> {
        let path = self.path_of(name);
        log::trace!("reading tile {:?} from {}", name, path.display());
        image::open(&path)
            .map(|image| image.into_rgba8())
            .map_err(|source| MapError::TileUnavailable {
                name: name.to_owned(),
                source,
            })
    }
}

/// Decoded tile images, keyed by quadtree node.
///
/// A tile is decoded on first use and then kept for the life of the cache. Two threads that
/// miss on the same tile at once both decode it and the later insert wins; both images are
/// identical, so readers never notice.
pub struct TileCache<S> {
    source: S,
    images: DashMap<usize, Arc<RgbaImage>>,
}

impl<S: TileSource> TileCache<S> {
    /// Creates an empty cache over `source`
    pub fn new(source: S) -> TileCache<S> {
        TileCache {
            source,
            images: DashMap::new(),
        }
    }

    /// The decoded image of `node`, loading it on first access
    pub fn image(&self, node: &QuadNode) -> Result<Arc<RgbaImage>> {
        if let Some(image) = self.images.get(&node.key()) {
            log::trace!("tile cache hit for {:?}", node.name());
            return Ok(Arc::clone(&image));
        }
        log::trace!("tile cache miss for {:?}", node.name());
        let image = Arc::new(self.source.load(node.name())?);
        self.images.insert(node.key(), Arc::clone(&image));
        Ok(image)
    }

    /// `true` if the image of `node` has been decoded already
    pub fn is_cached(&self, node: &QuadNode) -> bool {
        self.images.contains_key(&node.key())
    }

    /// The number of decoded tiles held
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// `true` if nothing has been decoded yet
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// The underlying source
    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S> Debug for TileCache<S> {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        fmt.debug_struct("TileCache")
            .field("cached", &self.images.len())
            .finish_non_exhaustive()
    }
}
