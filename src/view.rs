//! View parameters shared by projection and redraw

use crate::config::ViewConfig;
use crate::geometry::ScreenPoint;
use tracing::debug;

/// Current projection parameters.
///
/// Height scale only moves through the bounded commands below; a command that would
/// leave `[height_scale_min, height_scale_max)` is a no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    height_scale: i32,
    height_scale_min: i32,
    height_scale_max: i32,
    height_scale_step: i32,
    pub offset_x: i32,
    pub offset_y: i32,
    pub origin: ScreenPoint,
    rotation: f64,
    rotation_step: f64,
}

impl ViewState {
    /// Explicit parameters with the default height-scale bounds
    pub fn new(offset_x: i32, offset_y: i32, origin: ScreenPoint, height_scale: i32) -> Self {
        let defaults = ViewConfig::default();
        Self {
            height_scale: height_scale
                .clamp(defaults.height_scale_min, defaults.height_scale_max - 1),
            height_scale_min: defaults.height_scale_min,
            height_scale_max: defaults.height_scale_max,
            height_scale_step: defaults.height_scale_step,
            offset_x,
            offset_y,
            origin,
            rotation: 0.0,
            rotation_step: defaults.rotation_step,
        }
    }

    /// Derive spacing and origin so a `grid_w` x `grid_h` map at elevation 0 sits
    /// centered in a `window_w` x `window_h` frame.
    ///
    /// Spacing is the window size divided by `grid_w + grid_h` (the isometric span in
    /// cells), floored at `min_spacing` along x and half of it along y.
    pub fn fit(
        grid_w: usize,
        grid_h: usize,
        window_w: u32,
        window_h: u32,
        config: &ViewConfig,
    ) -> Self {
        let span = (grid_w + grid_h).max(1) as i64;
        let min_x = i64::from(config.min_spacing.max(1));
        let min_y = (min_x + 1) / 2;

        let offset_x = (i64::from(window_w) / span).max(min_x);
        let offset_y = (i64::from(window_h) / span).max(min_y);

        let (w, h) = (grid_w as i64, grid_h as i64);
        let origin = ScreenPoint::saturating_from_i64(
            i64::from(window_w) / 2 - (w - h) * offset_x / 2,
            i64::from(window_h) / 2 - (w + h - 2) * offset_y / 2,
        );

        // Inverted bounds fall back to the defaults so the clamp below is well formed
        let (min, max) = if config.height_scale_min < config.height_scale_max {
            (config.height_scale_min, config.height_scale_max)
        } else {
            let defaults = ViewConfig::default();
            (defaults.height_scale_min, defaults.height_scale_max)
        };

        let view = Self {
            height_scale: config.height_scale.clamp(min, max - 1),
            height_scale_min: min,
            height_scale_max: max,
            height_scale_step: config.height_scale_step.max(1),
            offset_x: crate::geometry::saturate_i32(offset_x),
            offset_y: crate::geometry::saturate_i32(offset_y),
            origin,
            rotation: 0.0,
            rotation_step: config.rotation_step,
        };
        debug!(?view, grid_w, grid_h, window_w, window_h, "fitted view");
        view
    }

    #[inline]
    pub fn height_scale(&self) -> i32 {
        self.height_scale
    }

    /// Rotation about the origin, in degrees within `[0, 360)`
    #[inline]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Returns false, leaving the state untouched, when the result would reach the
    /// upper bound.
    pub fn increase_height_scale(&mut self) -> bool {
        let next = self.height_scale.saturating_add(self.height_scale_step);
        if next >= self.height_scale_max {
            return false;
        }
        self.height_scale = next;
        debug!(height_scale = next, "height scale increased");
        true
    }

    /// Returns false, leaving the state untouched, when the result would fall below
    /// the lower bound.
    pub fn decrease_height_scale(&mut self) -> bool {
        let next = self.height_scale.saturating_sub(self.height_scale_step);
        if next < self.height_scale_min {
            return false;
        }
        self.height_scale = next;
        debug!(height_scale = next, "height scale decreased");
        true
    }

    pub fn rotate_clockwise(&mut self) -> bool {
        self.rotate_by(self.rotation_step)
    }

    pub fn rotate_counter_clockwise(&mut self) -> bool {
        self.rotate_by(-self.rotation_step)
    }

    fn rotate_by(&mut self, degrees: f64) -> bool {
        if degrees == 0.0 {
            return false;
        }
        self.rotation = (self.rotation + degrees).rem_euclid(360.0);
        debug!(rotation = self.rotation, "view rotated");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> ViewState {
        ViewState::new(10, 5, ScreenPoint::new(100, 100), 1)
    }

    #[test]
    fn test_increase_stops_before_upper_bound() {
        let mut v = view();
        while v.increase_height_scale() {}
        assert_eq!(v.height_scale(), 29);
        assert!(!v.increase_height_scale());
        assert_eq!(v.height_scale(), 29);
    }

    #[test]
    fn test_decrease_stops_at_lower_bound() {
        let mut v = view();
        while v.decrease_height_scale() {}
        assert_eq!(v.height_scale(), -10);
        assert!(!v.decrease_height_scale());
        assert_eq!(v.height_scale(), -10);
    }

    #[test]
    fn test_step_larger_than_headroom_is_noop() {
        let config = ViewConfig {
            height_scale: 27,
            height_scale_step: 5,
            ..ViewConfig::default()
        };
        let mut v = ViewState::fit(4, 4, 800, 600, &config);
        assert!(!v.increase_height_scale());
        assert_eq!(v.height_scale(), 27);
        assert!(v.decrease_height_scale());
        assert_eq!(v.height_scale(), 22);
    }

    #[test]
    fn test_fit_clamps_out_of_range_height_scale() {
        let config = ViewConfig {
            height_scale: 50,
            ..ViewConfig::default()
        };
        let mut v = ViewState::fit(3, 3, 300, 300, &config);
        assert_eq!(v.height_scale(), 29);
        assert!(!v.increase_height_scale());
        assert!(v.decrease_height_scale());
        assert_eq!(v.height_scale(), 28);

        let config = ViewConfig {
            height_scale: -50,
            ..ViewConfig::default()
        };
        let mut v = ViewState::fit(3, 3, 300, 300, &config);
        assert_eq!(v.height_scale(), -10);
        assert!(!v.decrease_height_scale());
    }

    #[test]
    fn test_fit_inverted_bounds_use_defaults() {
        let config = ViewConfig {
            height_scale: 5,
            height_scale_min: 20,
            height_scale_max: 10,
            ..ViewConfig::default()
        };
        let v = ViewState::fit(3, 3, 300, 300, &config);
        assert_eq!((v.height_scale_min, v.height_scale_max), (-10, 30));
        assert_eq!(v.height_scale(), 5);
    }

    #[test]
    fn test_fit_spacing_and_centering() {
        let v = ViewState::fit(10, 10, 800, 600, &ViewConfig::default());
        assert_eq!(v.offset_x, 40);
        assert_eq!(v.offset_y, 30);
        // square map: x column shift cancels
        assert_eq!(v.origin.x, 400);
        assert_eq!(v.origin.y, 300 - 18 * 30 / 2);
    }

    #[test]
    fn test_fit_clamps_spacing_for_huge_maps() {
        let v = ViewState::fit(5000, 5000, 800, 600, &ViewConfig::default());
        assert_eq!(v.offset_x, 2);
        assert_eq!(v.offset_y, 1);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut v = view();
        assert!(v.rotate_counter_clockwise());
        assert!((v.rotation() - 345.0).abs() < 1e-9);
        for _ in 0..24 {
            v.rotate_clockwise();
        }
        assert!((v.rotation() - 345.0).abs() < 1e-9);
    }
}
