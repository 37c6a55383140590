//! Isometric projection of grid cells

use crate::geometry::ScreenPoint;
use crate::view::ViewState;

/// Map grid cell `(x, y)` at `elevation` to screen space.
///
/// ```text
/// screen.x = (x - y) * offset_x + origin.x
/// screen.y = (x + y) * offset_y - elevation * height_scale + origin.y
/// ```
///
/// A positive height scale lifts higher cells up the screen. A non-zero view rotation
/// then turns the point about the origin. Arithmetic is wide and saturates into `i32`.
pub fn project(x: usize, y: usize, elevation: i32, view: &ViewState) -> ScreenPoint {
    let (gx, gy) = (x as i64, y as i64);
    let sx = (gx - gy) * i64::from(view.offset_x) + i64::from(view.origin.x);
    let sy = (gx + gy) * i64::from(view.offset_y)
        - i64::from(elevation) * i64::from(view.height_scale())
        + i64::from(view.origin.y);

    ScreenPoint::saturating_from_i64(sx, sy).rotate_about(view.origin, view.rotation())
}
