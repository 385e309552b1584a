//! Saddle disambiguation.
//!
//! When the two diagonals of a cell disagree, corner data alone cannot tell
//! whether the in-band regions touching the cell connect through its center.
//! The average of the four corners stands in for the center sample and
//! decides between one connected polygon and two disjoint ones.

use crate::cell::{Band, Corners, Trit};
use crate::shape::Shape;

/// An ambiguous table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Saddle {
    /// Two opposite corners within, the other two both below or both above.
    ///
    /// The center can never land on the far side of the band from the
    /// outside corners.
    Hexagon {
        connected: Shape,
        split: [Shape; 2],
        split_on: Trit,
    },
    /// One corner within, its diagonal partner on the far side of the band
    /// from the remaining pair.
    Heptagon {
        connected: Shape,
        split: [Shape; 2],
        split_on: Trit,
    },
    /// No corner within, each diagonal in an opposite state.
    Octagon { below: [Shape; 2], above: [Shape; 2] },
}

/// Topology picked for a saddle cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Connected(Shape),
    Split([Shape; 2]),
}

/// Classify the cell center (mean of the corners) against the band.
pub fn center_state(corners: &Corners, band: Band) -> Trit {
    Trit::classify(corners.mean(), band)
}

impl Saddle {
    /// Pick a topology given the center state.
    pub fn resolve(&self, center: Trit) -> Resolution {
        match *self {
            Saddle::Hexagon {
                connected,
                split,
                split_on,
            } => {
                debug_assert!(
                    self.is_possible(center),
                    "cell center on the far side of the band from both outside corners"
                );
                if center == split_on {
                    Resolution::Split(split)
                } else {
                    Resolution::Connected(connected)
                }
            }
            Saddle::Heptagon {
                connected,
                split,
                split_on,
            } => {
                if center == split_on {
                    Resolution::Split(split)
                } else {
                    Resolution::Connected(connected)
                }
            }
            Saddle::Octagon { below, above } => match center {
                Trit::Below => Resolution::Split(below),
                Trit::Within => Resolution::Connected(Shape::Octagon),
                Trit::Above => Resolution::Split(above),
            },
        }
    }

    /// Whether `center` can arise from corners matching this saddle.
    pub fn is_possible(&self, center: Trit) -> bool {
        match *self {
            Saddle::Hexagon { split_on, .. } => matches!(
                (split_on, center),
                (Trit::Below, Trit::Below | Trit::Within) | (Trit::Above, Trit::Above | Trit::Within)
            ),
            Saddle::Heptagon { .. } | Saddle::Octagon { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{classify, BandCell};
    use crate::shape::{lookup, shapes, Entry};

    fn band() -> Band {
        Band::new(4.0, 6.0)
    }

    fn cell(bl: f64, br: f64, tr: f64, tl: f64) -> BandCell {
        let corners = Corners { bl, br, tr, tl };
        BandCell {
            x: 0,
            y: 0,
            code: classify(&corners, band()).unwrap(),
            corners,
        }
    }

    fn saddle_of(cell: &BandCell) -> Saddle {
        match lookup(cell.code) {
            Entry::Saddle(saddle) => saddle,
            other => panic!("code {} is not a saddle: {other:?}", cell.code.raw()),
        }
    }

    #[test]
    fn test_center_state() {
        let corners = Corners {
            bl: 0.0,
            br: 10.0,
            tr: 0.0,
            tl: 10.0,
        };
        assert_eq!(center_state(&corners, band()), Trit::Within);
        assert_eq!(center_state(&corners, Band::new(6.0, 8.0)), Trit::Below);
        assert_eq!(center_state(&corners, Band::new(2.0, 4.0)), Trit::Above);
    }

    #[test]
    fn test_hexagon_saddle_flip() {
        // bl and tr within, br and tl below
        let joined = cell(6.0, 3.5, 6.0, 3.5); // mean 4.75
        let apart = cell(4.0, 0.0, 4.0, 0.0); // mean 2.0
        assert_eq!(joined.code, apart.code);
        assert_eq!(joined.code.raw(), 17);

        assert_eq!(shapes(&joined, band()).as_slice(), &[Shape::HexagonLtRb]);
        assert_eq!(
            shapes(&apart, band()).as_slice(),
            &[Shape::TriangleBl, Shape::TriangleTr]
        );
    }

    #[test]
    fn test_hexagon_saddle_above() {
        // br and tl within, bl and tr above
        let joined = cell(6.5, 5.5, 6.5, 5.5); // mean 6.0
        let apart = cell(10.0, 6.0, 10.0, 6.0); // mean 8.0
        assert_eq!(joined.code.raw(), 102);

        assert_eq!(shapes(&joined, band()).as_slice(), &[Shape::HexagonBlTr]);
        assert_eq!(
            shapes(&apart, band()).as_slice(),
            &[Shape::TriangleTl, Shape::TriangleBr]
        );
    }

    #[test]
    fn test_heptagon_saddle_flip() {
        // bl below, br above, tr within, tl above
        let joined = cell(0.0, 7.0, 5.0, 7.0); // mean 4.75
        let apart = cell(0.0, 10.0, 5.0, 10.0); // mean 6.25
        assert_eq!(joined.code.raw(), 152);
        assert_eq!(joined.code, apart.code);

        assert_eq!(shapes(&joined, band()).as_slice(), &[Shape::HeptagonTr]);
        assert_eq!(
            shapes(&apart, band()).as_slice(),
            &[Shape::TriangleTr, Shape::TetragonBl]
        );

        // mirrored states split when the center is below
        let below = cell(10.0, 0.0, 5.0, 0.0); // mean 3.75
        assert_eq!(below.code.raw(), 18);
        assert_eq!(
            shapes(&below, band()).as_slice(),
            &[Shape::TriangleTr, Shape::TetragonBl]
        );
    }

    #[test]
    fn test_octagon_saddle_flip() {
        // bl and tr below, br and tl above
        let within = cell(0.0, 10.0, 0.0, 10.0);
        let below = cell(0.0, 7.0, 0.0, 7.0);
        let above = cell(3.0, 10.0, 3.0, 10.0);
        assert_eq!(within.code.raw(), 136);

        assert_eq!(shapes(&within, band()).as_slice(), &[Shape::Octagon]);
        assert_eq!(
            shapes(&below, band()).as_slice(),
            &[Shape::TetragonTl, Shape::TetragonBr]
        );
        assert_eq!(
            shapes(&above, band()).as_slice(),
            &[Shape::TetragonBl, Shape::TetragonTr]
        );

        let mirrored = cell(10.0, 0.0, 10.0, 0.0);
        assert_eq!(mirrored.code.raw(), 34);
        assert_eq!(
            saddle_of(&mirrored).resolve(Trit::Below),
            Resolution::Split([Shape::TetragonBl, Shape::TetragonTr])
        );
    }

    #[test]
    fn test_hexagon_center_bounds() {
        let saddle = saddle_of(&cell(4.0, 0.0, 4.0, 0.0));
        assert!(saddle.is_possible(Trit::Below));
        assert!(saddle.is_possible(Trit::Within));
        assert!(!saddle.is_possible(Trit::Above));
    }
}
