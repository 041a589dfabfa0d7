//! Drawing routes on top of composited rasters.

use crate::{Extent, Point};
use image::{GrayImage, Luma, Pixel, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

/// How a route is stroked.
///
/// Strokes always have round caps and round joins, so consecutive segments blend into one
/// continuous line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RouteStyle {
    /// the stroke width in pixels (defaults to `5.0`)
    pub width: f32,
    /// the stroke color, alpha included (defaults to a light blue at 200/255 opacity)
    pub color: Rgba<u8>,
}

impl Default for RouteStyle {
    fn default() -> RouteStyle {
        RouteStyle {
            width: 5.0,
            color: Rgba([108, 181, 230, 200]),
        }
    }
}

/// Maps `point` to pixel coordinates of a `width` x `height` raster covering `extent`.
///
/// x grows with the longitude, y grows as the latitude falls.
/// ## Examples
/// Basic usage:
/// ```
/// # use tile_router::{overlay::project, Extent, Point};
/// let extent = Extent::from_bounds(10.0, 20.0, 12.0, 19.0);
///
/// assert_eq!(project(&extent, 512, 256, Point::new(11.0, 19.75)), (256.0, 64.0));
/// ```
pub fn project(extent: &Extent, width: u32, height: u32, point: Point) -> (f32, f32) {
    let (x, y) = to_pixels(extent, width, height, point);
    (x as f32, y as f32)
}

fn to_pixels(extent: &Extent, width: u32, height: u32, point: Point) -> (f64, f64) {
    let x = (point.x - extent.upper_left.x) / extent.width() * f64::from(width);
    let y = (extent.upper_left.y - point.y) / extent.height() * f64::from(height);
    (x, y)
}

/// Strokes the polyline through `points` onto `image`, which covers `extent`.
///
/// The whole stroke is composited once, so overlapping segments and joins do not build up a
/// darker color. Fewer than two points draw nothing, and neither does an empty or inverted
/// `extent`. Segments are clipped to the image, so points far off the raster are cheap.
pub fn draw_route(image: &mut RgbaImage, extent: &Extent, points: &[Point], style: &RouteStyle) {
    if points.len() < 2 {
        return;
    }
    if !extent.is_valid() {
        log::warn!("not drawing a route onto the degenerate extent {}", extent);
        return;
    }
    let (width, height) = image.dimensions();
    let pixels: Vec<(f64, f64)> = points
        .iter()
        .map(|&point| to_pixels(extent, width, height, point))
        .collect();

    let margin = f64::from(style.width);
    let bounds = (
        (-margin, -margin),
        (f64::from(width) + margin, f64::from(height) + margin),
    );
    let mut mask = GrayImage::new(width, height);
    for segment in pixels.windows(2) {
        if let Some((start, end)) = clip_segment(segment[0], segment[1], bounds) {
            stroke_segment(
                &mut mask,
                (start.0 as f32, start.1 as f32),
                (end.0 as f32, end.1 as f32),
                style.width,
            );
        }
    }

    let mut painted = 0usize;
    for (x, y, coverage) in mask.enumerate_pixels() {
        if coverage[0] > 0 {
            image.get_pixel_mut(x, y).blend(&style.color);
            painted += 1;
        }
    }
    log::trace!(
        "stroked {} route segments over {} pixels",
        pixels.len() - 1,
        painted
    );
}

/// Cuts the segment from `start` to `end` down to the part inside `bounds` (Liang-Barsky).
fn clip_segment(
    start: (f64, f64),
    end: (f64, f64),
    bounds: ((f64, f64), (f64, f64)),
) -> Option<((f64, f64), (f64, f64))> {
    if ![start.0, start.1, end.0, end.1].iter().all(|c| c.is_finite()) {
        return None;
    }
    let ((min_x, min_y), (max_x, max_y)) = bounds;
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;
    let mut enter = 0.0f64;
    let mut leave = 1.0f64;
    for (p, q) in [
        (-dx, start.0 - min_x),
        (dx, max_x - start.0),
        (-dy, start.1 - min_y),
        (dy, max_y - start.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let t = q / p;
            if p < 0.0 {
                enter = enter.max(t);
            } else {
                leave = leave.min(t);
            }
        }
    }
    if enter > leave {
        return None;
    }
    Some((
        (start.0 + enter * dx, start.1 + enter * dy),
        (start.0 + leave * dx, start.1 + leave * dy),
    ))
}

/// Marks a thick segment with round ends on `mask` by stamping discs along it.
fn stroke_segment(mask: &mut GrayImage, start: (f32, f32), end: (f32, f32), width: f32) {
    let on = Luma([u8::MAX]);
    if width <= 1.0 {
        draw_line_segment_mut(mask, start, end, on);
        return;
    }

    // rounding down keeps the stroke from growing past `width`
    let radius = (width / 2.0).max(1.0).floor();
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;
    let length = (dx * dx + dy * dy).sqrt();

    let step = (radius * 0.5).max(0.5);
    let steps = (length / step).ceil() as i32;
    for i in 0..=steps {
        let t = if steps == 0 { 0.0 } else { i as f32 / steps as f32 };
        let center = (start.0 + t * dx, start.1 + t * dy);
        draw_filled_circle_mut(
            mask,
            (center.0.round() as i32, center.1.round() as i32),
            radius as i32,
            on,
        );
    }
}
