//! Crossing-point interpolation along a cell side.
//!
//! Every function receives the two sample values at the ends of a side
//! (`a` at the lower coordinate, `b` at the higher one) and both band limits,
//! and returns how far from `a` toward `b` the crossing lies.

use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

/// Interpolation callback: `(a, b, min, max) -> fraction in [0, 1]`.
pub type InterpolateFn = Arc<dyn Fn(f64, f64, f64, f64) -> f64 + Send + Sync>;

/// The three interpolation slots used by the shape table.
///
/// `single` locates the only crossing of a side that moves one state
/// (below/within or within/above). A side that goes straight from below to
/// above is crossed twice and uses `first` for the crossing nearer `a`
/// and `second` for the crossing nearer `b`.
#[derive(Clone)]
pub struct Interpolation {
    single: InterpolateFn,
    first: InterpolateFn,
    second: InterpolateFn,
}

impl Interpolation {
    /// Straight-line interpolation between the two samples.
    pub fn linear() -> Self {
        Self {
            single: Arc::new(linear_single),
            first: Arc::new(linear_first),
            second: Arc::new(linear_second),
        }
    }

    /// Cosine-smoothed interpolation.
    ///
    /// The linear position is eased with `(1 - cos(t·π)) / 2` and then pulled
    /// 0.1% toward the side midpoint, so a crossing never lands exactly on
    /// a corner.
    pub fn cosine() -> Self {
        Self {
            single: Arc::new(|a, b, min, max| smooth(linear_single(a, b, min, max))),
            first: Arc::new(|a, b, min, max| smooth(linear_first(a, b, min, max))),
            second: Arc::new(|a, b, min, max| smooth(linear_second(a, b, min, max))),
        }
    }

    #[must_use]
    pub fn with_single(mut self, f: impl Fn(f64, f64, f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.single = Arc::new(f);
        self
    }

    #[must_use]
    pub fn with_first(mut self, f: impl Fn(f64, f64, f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.first = Arc::new(f);
        self
    }

    #[must_use]
    pub fn with_second(mut self, f: impl Fn(f64, f64, f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        self.second = Arc::new(f);
        self
    }

    #[inline]
    pub fn single(&self, a: f64, b: f64, min: f64, max: f64) -> f64 {
        (self.single)(a, b, min, max)
    }

    #[inline]
    pub fn first(&self, a: f64, b: f64, min: f64, max: f64) -> f64 {
        (self.first)(a, b, min, max)
    }

    #[inline]
    pub fn second(&self, a: f64, b: f64, min: f64, max: f64) -> f64 {
        (self.second)(a, b, min, max)
    }
}

impl Default for Interpolation {
    fn default() -> Self {
        Self::linear()
    }
}

impl fmt::Debug for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpolation").finish_non_exhaustive()
    }
}

fn linear_single(a: f64, b: f64, min: f64, max: f64) -> f64 {
    if a < b {
        if a < min {
            (min - a) / (b - a)
        } else {
            (max - a) / (b - a)
        }
    } else if a > b {
        if a > max {
            (a - max) / (a - b)
        } else {
            (a - min) / (a - b)
        }
    } else {
        0.5
    }
}

fn linear_first(a: f64, b: f64, min: f64, max: f64) -> f64 {
    if a < b {
        (min - a) / (b - a)
    } else if a > b {
        (a - max) / (a - b)
    } else {
        0.5
    }
}

fn linear_second(a: f64, b: f64, min: f64, max: f64) -> f64 {
    if a < b {
        (max - a) / (b - a)
    } else if a > b {
        (a - min) / (a - b)
    } else {
        0.5
    }
}

fn smooth(mu: f64) -> f64 {
    let mu2 = (1.0 - (mu * PI).cos()) / 2.0;
    0.5 + (mu2 - 0.5) * 0.999
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_single_crossing() {
        let interp = Interpolation::linear();

        // rising through the lower limit
        assert_relative_eq!(interp.single(0.0, 10.0, 4.0, 6.0), 0.4);
        // rising from inside through the upper limit
        assert_relative_eq!(interp.single(5.0, 10.0, 4.0, 6.0), 0.2);
        // falling through the upper limit
        assert_relative_eq!(interp.single(10.0, 0.0, 4.0, 6.0), 0.4);
        // falling from inside through the lower limit
        assert_relative_eq!(interp.single(5.0, 0.0, 4.0, 6.0), 0.2);
    }

    #[test]
    fn test_linear_double_crossing() {
        let interp = Interpolation::linear();

        assert_relative_eq!(interp.first(0.0, 10.0, 4.0, 6.0), 0.4);
        assert_relative_eq!(interp.second(0.0, 10.0, 4.0, 6.0), 0.6);

        assert_relative_eq!(interp.first(10.0, 0.0, 4.0, 6.0), 0.4);
        assert_relative_eq!(interp.second(10.0, 0.0, 4.0, 6.0), 0.6);
    }

    #[test]
    fn test_equal_values_cross_midway() {
        let interp = Interpolation::linear();
        assert_eq!(interp.single(3.0, 3.0, 4.0, 6.0), 0.5);
        assert_eq!(interp.first(3.0, 3.0, 4.0, 6.0), 0.5);
        assert_eq!(interp.second(3.0, 3.0, 4.0, 6.0), 0.5);
    }

    #[test]
    fn test_cosine_stays_inside_side() {
        let interp = Interpolation::cosine();

        let mid = interp.single(0.0, 10.0, 5.0, 6.0);
        assert_relative_eq!(mid, 0.5, epsilon = 1e-12);

        let near = interp.single(0.0, 10.0, 0.05, 6.0);
        assert!(near > 0.0 && near < 0.001, "got {near}");

        let low = interp.first(0.0, 10.0, 2.0, 8.0);
        let high = interp.second(0.0, 10.0, 2.0, 8.0);
        assert!(low < 0.2 && high > 0.8, "got {low}, {high}");
    }

    #[test]
    fn test_custom_slot() {
        let interp = Interpolation::default().with_second(|_, _, _, _| 0.75);
        assert_eq!(interp.second(0.0, 10.0, 4.0, 6.0), 0.75);
        assert_relative_eq!(interp.first(0.0, 10.0, 4.0, 6.0), 0.4);
    }
}
