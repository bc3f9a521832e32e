/// Maps canonical time values to horizontal pixel positions and back.
///
/// The visible range `[range_min, range_max]` is stretched over the usable
/// width (`width - inset_left - inset_right`). A degenerate range is treated
/// as one canonical unit wide so the scale stays finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    pub range_min: i64,
    pub range_max: i64,
    /// Total pixel width of the chart surface (already zoomed).
    pub width: f64,
    pub inset_left: f64,
    pub inset_right: f64,
}

impl CoordinateMapper {
    pub fn new(range_min: i64, range_max: i64, width: f64) -> Self {
        Self {
            range_min,
            range_max,
            width,
            inset_left: 0.0,
            inset_right: 0.0,
        }
    }

    pub fn with_insets(mut self, left: f64, right: f64) -> Self {
        self.inset_left = left;
        self.inset_right = right;
        self
    }

    /// Pixels per canonical unit.
    pub fn scale(&self) -> f64 {
        let span = (self.range_max.saturating_sub(self.range_min)).max(1) as f64;
        let usable = (self.width - self.inset_left - self.inset_right).max(f64::EPSILON);
        usable / span
    }

    /// Convert a canonical value to an x-pixel position.
    pub fn canonical_to_screen(&self, value: i64) -> f64 {
        self.scale() * (value as f64 - self.range_min as f64) + self.inset_left
    }

    /// Convert an x-pixel position back to a canonical value, truncating
    /// toward zero like an integer cast.
    pub fn screen_to_canonical(&self, x: f64) -> i64 {
        (((x - self.inset_left) / self.scale()) as i64).saturating_add(self.range_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DAY_MILLIS;

    #[test]
    fn maps_range_ends_to_usable_width() {
        let mapper = CoordinateMapper::new(0, 7 * DAY_MILLIS, 200.0);
        assert!(mapper.canonical_to_screen(0).abs() < 1e-9);
        assert!((mapper.canonical_to_screen(7 * DAY_MILLIS) - 200.0).abs() < 1e-9);
        assert_eq!(mapper.screen_to_canonical(0.0), 0);
    }

    #[test]
    fn insets_shift_the_origin() {
        let mapper = CoordinateMapper::new(100, 200, 120.0).with_insets(10.0, 10.0);
        assert!((mapper.canonical_to_screen(100) - 10.0).abs() < 1e-9);
        assert!((mapper.canonical_to_screen(200) - 110.0).abs() < 1e-9);
        assert_eq!(mapper.screen_to_canonical(60.0), 150);
    }

    #[test]
    fn degenerate_range_stays_finite() {
        let mapper = CoordinateMapper::new(0, 0, 100.0);
        assert!(mapper.scale().is_finite());
        assert!(mapper.canonical_to_screen(0).is_finite());
        assert_eq!(mapper.screen_to_canonical(0.0), 0);
    }

    #[test]
    fn zero_usable_width_does_not_divide_by_zero() {
        let mapper = CoordinateMapper::new(0, 10, 2.0).with_insets(1.0, 1.0);
        assert!(mapper.scale() > 0.0);
        let _ = mapper.screen_to_canonical(5.0);
    }
}
