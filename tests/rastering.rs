use nanorand::{Rng, WyRand};
use tile_router::prelude::*;
use tile_router::{config::BERKELEY, raster::plan_raster, QuadTree, Rgba, RgbaImage};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_point(rng: &mut WyRand, extent: &Extent) -> Point {
    let fx = rng.generate_range(0..1_000_000u32) as f64 / 1_000_000.0;
    let fy = rng.generate_range(0..1_000_000u32) as f64 / 1_000_000.0;
    Point::new(
        extent.upper_left.x + fx * extent.width(),
        extent.upper_left.y - fy * extent.height(),
    )
}

/// A tile colored by its address, so the stitched image shows where every tile went.
fn tile_color(name: &str) -> Rgba<u8> {
    let mut color = [0u8, 0, 0, 255];
    for (i, digit) in name.bytes().enumerate() {
        color[i % 3] = color[i % 3].wrapping_mul(5).wrapping_add(digit);
    }
    Rgba(color)
}

fn colored_tiles(name: &str) -> tile_router::Result<RgbaImage> {
    Ok(RgbaImage::from_pixel(256, 256, tile_color(name)))
}

#[test]
fn located_tiles_contain_the_point() {
    let tree = QuadTree::new(BERKELEY, 7);
    let mut rng = WyRand::new_seed(17);

    for _ in 0..200 {
        let point = random_point(&mut rng, &BERKELEY);
        for depth in 0..=7 {
            let name = tree.locate(point, depth);
            assert_eq!(name.len(), usize::from(depth));
            let node = tree.lookup(&name).unwrap();
            assert!(
                node.extent().contains(point),
                "{} is not in tile {:?} {}",
                point,
                name,
                node.extent()
            );
        }
    }
}

#[test]
fn raster_covers_the_query() {
    init();
    let config = EngineConfig::default();
    let tree = QuadTree::new(config.root, config.max_depth);
    let mut rng = WyRand::new_seed(5);

    for _ in 0..100 {
        let a = random_point(&mut rng, &BERKELEY);
        let b = random_point(&mut rng, &BERKELEY);
        let query = Extent::from_bounds(a.x.min(b.x), a.y.max(b.y), a.x.max(b.x), a.y.min(b.y));
        if !query.is_valid() {
            continue;
        }
        let width = rng.generate_range(64..2048u32) as f64;
        let height = rng.generate_range(64..2048u32) as f64;

        let plan = plan_raster(&tree, &config, &query, width, height).unwrap();
        let info = plan.info;

        assert!(info.extent.covers(&query), "{} does not cover {}", info.extent, query);
        assert!(config.root.covers(&info.extent));
        assert_eq!(info.width, plan.columns() as u32 * 256);
        assert_eq!(info.height, plan.rows() as u32 * 256);
        // the chosen tiles are at least as detailed as asked for, unless already at the leaves
        if info.depth < 7 {
            assert!(config.lon_per_pixel(info.depth) <= query.width() / width);
        }
        for (row, names) in plan.names(&tree).iter().enumerate() {
            assert_eq!(names.len(), plan.columns());
            for (column, name) in names.iter().enumerate() {
                assert_eq!(name.len(), usize::from(info.depth));
                let extent = tree.lookup(name).unwrap().extent();
                let lon_step = config.root.width() / 2f64.powi(i32::from(info.depth));
                let lat_step = config.root.height() / 2f64.powi(i32::from(info.depth));
                assert!(
                    (extent.upper_left.x - (info.extent.upper_left.x + column as f64 * lon_step))
                        .abs()
                        < 1e-9
                );
                assert!(
                    (extent.upper_left.y - (info.extent.upper_left.y - row as f64 * lat_step))
                        .abs()
                        < 1e-9
                );
            }
        }
    }
}

#[test]
fn tiles_are_stitched_in_place() {
    let engine = MapEngine::new(Graph::new(), colored_tiles, EngineConfig::default());
    let [_, upper_right, ..] = engine.config().root.quadrants();

    let raster = engine.resolve_raster(&upper_right, 512.0, 512.0).unwrap();

    assert_eq!(raster.info.depth, 2);
    assert_eq!(raster.image.dimensions(), (512, 512));
    assert_eq!(*raster.image.get_pixel(10, 10), tile_color("21"));
    assert_eq!(*raster.image.get_pixel(300, 10), tile_color("22"));
    assert_eq!(*raster.image.get_pixel(10, 300), tile_color("23"));
    assert_eq!(*raster.image.get_pixel(511, 511), tile_color("24"));
    assert_eq!(engine.tiles().len(), 4);
}

#[test]
fn reads_tiles_from_a_directory() {
    init();
    let dir = tempfile::tempdir().unwrap();
    for name in ["1", "2", "3", "4"] {
        RgbaImage::from_pixel(256, 256, tile_color(name))
            .save(dir.path().join(format!("{}.png", name)))
            .unwrap();
    }
    let engine = MapEngine::new(
        Graph::new(),
        DirectoryTiles::new(dir.path()),
        EngineConfig::default(),
    );

    let raster = engine
        .resolve_raster(&engine.config().root, 512.0, 512.0)
        .unwrap();

    assert_eq!(raster.info.depth, 1);
    assert_eq!(raster.info.extent, engine.config().root);
    assert_eq!(*raster.image.get_pixel(0, 0), tile_color("1"));
    assert_eq!(*raster.image.get_pixel(511, 0), tile_color("2"));
    assert_eq!(*raster.image.get_pixel(0, 511), tile_color("3"));
    assert_eq!(*raster.image.get_pixel(511, 511), tile_color("4"));
}

#[test]
fn missing_tile_fails_the_raster() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["1", "2", "3"] {
        RgbaImage::from_pixel(256, 256, tile_color(name))
            .save(dir.path().join(format!("{}.png", name)))
            .unwrap();
    }
    let engine = MapEngine::new(
        Graph::new(),
        DirectoryTiles::new(dir.path()),
        EngineConfig::default(),
    );

    let result = engine.resolve_raster(&engine.config().root, 512.0, 512.0);

    match result {
        Err(MapError::TileUnavailable { name, .. }) => assert_eq!(name, "4"),
        other => panic!("expected tile 4 to be missing, got {:?}", other.map(|r| r.info)),
    }
}

#[test]
fn route_on_the_map() {
    let mut graph = Graph::new();
    let [upper_left, _, _, lower_right] = BERKELEY.quadrants();
    let a = Point::new(
        upper_left.upper_left.x + upper_left.width() / 2.0,
        upper_left.upper_left.y - upper_left.height() / 2.0,
    );
    let b = Point::new(
        lower_right.upper_left.x + lower_right.width() / 2.0,
        a.y,
    );
    graph.add_node(10, a).unwrap();
    graph.add_node(20, b).unwrap();
    graph.add_way(&[10, 20]).unwrap();
    let engine = MapEngine::new(graph, colored_tiles, EngineConfig::default());

    let (raster, path) = engine
        .raster_with_route(&BERKELEY, 256.0, 256.0, a, b)
        .unwrap();

    assert_eq!(path, vec![10, 20]);
    let background = tile_color("");
    // the road runs across the middle of the upper half
    assert_ne!(*raster.image.get_pixel(128, 64), background);
    assert_eq!(*raster.image.get_pixel(128, 192), background);
    assert_eq!(*raster.image.get_pixel(10, 64), background);
}

#[test]
fn concurrent_rasters() {
    let engine = MapEngine::new(Graph::new(), colored_tiles, EngineConfig::default());
    let queries: Vec<Extent> = engine
        .quadtree()
        .lookup("14")
        .unwrap()
        .extent()
        .quadrants()
        .to_vec();

    std::thread::scope(|scope| {
        for query in queries.iter() {
            let engine = &engine;
            scope.spawn(move || {
                let raster = engine.resolve_raster(query, 1024.0, 1024.0).unwrap();
                assert_eq!(raster.info.depth, 5);
                assert!(raster.info.extent.covers(query));
            });
        }
    });
    assert!(!engine.tiles().is_empty());
}
