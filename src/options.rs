//! Options for an isoband computation.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::interpolate::Interpolation;
use crate::point::Ring;

/// Called after every band with the results so far, the band's lower
/// bound and its bandwidth.
pub type ProgressCallback = Arc<dyn Fn(&[Vec<Ring>], f64, f64) + Send + Sync>;

/// Configuration for [`crate::iso_bands`].
///
/// The data-only fields deserialize from the usual option keys:
///
/// ```
/// use geo_isobands::BandOptions;
///
/// let options: BandOptions = serde_json::from_str(r#"{ "polygons": true, "noQuadTree": true }"#).unwrap();
/// assert!(options.polygons);
/// assert!(options.no_quad_tree);
/// assert!(!options.linear_ring);
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BandOptions {
    /// Emit one polygon per cell instead of stitched outline rings.
    pub polygons: bool,
    /// Scan every cell instead of querying the quadtree.
    pub no_quad_tree: bool,
    /// Log progress at info level.
    pub verbose: bool,
    /// Repeat the first point of every ring at its end.
    pub linear_ring: bool,
    #[serde(skip)]
    pub interpolation: Interpolation,
    #[serde(skip)]
    pub success_callback: Option<ProgressCallback>,
}

impl BandOptions {
    /// Stitched outlines through the quadtree, linear interpolation.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_polygons(mut self, polygons: bool) -> Self {
        self.polygons = polygons;
        self
    }

    #[must_use]
    pub fn with_no_quad_tree(mut self, no_quad_tree: bool) -> Self {
        self.no_quad_tree = no_quad_tree;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub fn with_linear_ring(mut self, linear_ring: bool) -> Self {
        self.linear_ring = linear_ring;
        self
    }

    #[must_use]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    #[must_use]
    pub fn with_success_callback(
        mut self,
        callback: impl Fn(&[Vec<Ring>], f64, f64) + Send + Sync + 'static,
    ) -> Self {
        self.success_callback = Some(Arc::new(callback));
        self
    }
}

impl fmt::Debug for BandOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BandOptions")
            .field("polygons", &self.polygons)
            .field("no_quad_tree", &self.no_quad_tree)
            .field("verbose", &self.verbose)
            .field("linear_ring", &self.linear_ring)
            .field("interpolation", &self.interpolation)
            .field("success_callback", &self.success_callback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = BandOptions::new();
        assert!(!options.polygons);
        assert!(!options.no_quad_tree);
        assert!(!options.verbose);
        assert!(!options.linear_ring);
        assert!(options.success_callback.is_none());
    }

    #[test]
    fn test_deserialize_option_keys() {
        let options: BandOptions =
            serde_json::from_str(r#"{"verbose": true, "linearRing": true, "noQuadTree": false}"#).unwrap();
        assert!(options.verbose);
        assert!(options.linear_ring);
        assert!(!options.no_quad_tree);
        assert!(!options.polygons);
    }

    #[test]
    fn test_builder_and_debug() {
        let options = BandOptions::new()
            .with_polygons(true)
            .with_success_callback(|_, _, _| {});
        assert!(options.polygons);

        let text = format!("{options:?}");
        assert!(text.contains("polygons: true"));
        assert!(text.contains("success_callback: true"));
    }
}
