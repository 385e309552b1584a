use crate::grid::Grid;

/// Inclusive band of values `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Band starting at `threshold` and `bandwidth` wide.
    ///
    /// A negative bandwidth gives a reversed band; nothing classifies as
    /// within it.
    pub fn from_threshold(threshold: f64, bandwidth: f64) -> Self {
        Self::new(threshold, threshold + bandwidth)
    }

    /// Whether a value range `[lo, hi]` can touch the band.
    #[inline]
    pub fn overlaps(&self, lo: f64, hi: f64) -> bool {
        !(hi < self.min || lo > self.max)
    }
}

/// Ternary classification of one sample against a band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Trit {
    Below = 0,
    Within = 1,
    Above = 2,
}

impl Trit {
    /// Classify a sample. Both band limits count as within.
    #[inline]
    pub fn classify(value: f64, band: Band) -> Self {
        if value < band.min {
            Trit::Below
        } else if value > band.max {
            Trit::Above
        } else {
            Trit::Within
        }
    }

    #[inline]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Trit::Below),
            1 => Some(Trit::Within),
            2 => Some(Trit::Above),
            _ => None,
        }
    }
}

/// The four corner samples of a cell.
///
/// `bl` is `(x, y)`, `br` is `(x + 1, y)`, `tr` is `(x + 1, y + 1)` and `tl`
/// is `(x, y + 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corners {
    pub bl: f64,
    pub br: f64,
    pub tr: f64,
    pub tl: f64,
}

impl Corners {
    pub fn has_missing(&self) -> bool {
        self.bl.is_nan() || self.br.is_nan() || self.tr.is_nan() || self.tl.is_nan()
    }

    /// Average of the four samples, used as the cell center estimate.
    pub fn mean(&self) -> f64 {
        (self.bl + self.br + self.tr + self.tl) / 4.0
    }
}

/// Packed classification of a cell: `tl << 6 | tr << 4 | br << 2 | bl`,
/// two bits per corner trit.
///
/// Only 81 of the 256 codes are reachable, since no corner ever holds
/// the bit pattern `3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCode(u8);

impl CellCode {
    pub const fn from_trits(bl: Trit, br: Trit, tr: Trit, tl: Trit) -> Self {
        Self((tl as u8) << 6 | (tr as u8) << 4 | (br as u8) << 2 | bl as u8)
    }

    /// Wrap a raw code. Returns `None` for a code with an invalid corner.
    pub const fn new(raw: u8) -> Option<Self> {
        let mut shift = 0;
        while shift < 8 {
            if (raw >> shift) & 3 == 3 {
                return None;
            }
            shift += 2;
        }
        Some(Self(raw))
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    fn trit(self, shift: u8) -> Trit {
        match (self.0 >> shift) & 3 {
            0 => Trit::Below,
            1 => Trit::Within,
            _ => Trit::Above,
        }
    }

    pub fn bl(self) -> Trit {
        self.trit(0)
    }

    pub fn br(self) -> Trit {
        self.trit(2)
    }

    pub fn tr(self) -> Trit {
        self.trit(4)
    }

    pub fn tl(self) -> Trit {
        self.trit(6)
    }
}

/// Classify four corner samples against a band.
///
/// Returns `None` if any sample is missing.
pub fn classify(corners: &Corners, band: Band) -> Option<CellCode> {
    if corners.has_missing() {
        return None;
    }
    Some(CellCode::from_trits(
        Trit::classify(corners.bl, band),
        Trit::classify(corners.br, band),
        Trit::classify(corners.tr, band),
        Trit::classify(corners.tl, band),
    ))
}

/// A classified grid cell for one band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandCell {
    pub x: usize,
    pub y: usize,
    pub code: CellCode,
    pub corners: Corners,
}

/// Classify cell `(x, y)` of `grid`. `None` when a corner sample is missing.
pub fn classify_cell(grid: &Grid, x: usize, y: usize, band: Band) -> Option<BandCell> {
    let corners = grid.corners(x, y);
    let code = classify(&corners, band)?;
    Some(BandCell {
        x,
        y,
        code,
        corners,
    })
}
