//! Screen-space points and the integer rotation used by the view

/// Integer pixel coordinate. May lie outside any buffer; writers bounds-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Build a point from wide intermediates, saturating each axis into `i32`
    #[inline]
    pub fn saturating_from_i64(x: i64, y: i64) -> Self {
        Self {
            x: saturate_i32(x),
            y: saturate_i32(y),
        }
    }

    /// Rotate this point about `pivot` by `degrees` (positive = clockwise on screen,
    /// since screen y grows downward).
    ///
    /// The offset from the pivot is rotated in floating point and truncated toward zero.
    pub fn rotate_about(self, pivot: Self, degrees: f64) -> Self {
        if degrees == 0.0 {
            return self;
        }
        let rad = degrees.to_radians();
        let (sin, cos) = rad.sin_cos();
        let u = f64::from(self.x) - f64::from(pivot.x);
        let v = f64::from(self.y) - f64::from(pivot.y);

        // `as i64` truncates toward zero and saturates on overflow
        let du = (u * cos - v * sin) as i64;
        let dv = (u * sin + v * cos) as i64;

        Self::saturating_from_i64(i64::from(pivot.x) + du, i64::from(pivot.y) + dv)
    }
}

#[inline]
pub(crate) fn saturate_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
