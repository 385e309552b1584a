//! Shape lookup table for isoband cells.
//!
//! Each of the 81 reachable cell codes maps to a polygon family. A shape
//! is a clockwise list of vertices in the unit square, each either a cell
//! corner or a crossing on one of the four sides. Crossing positions are
//! resolved through the configured [`Interpolation`], and the directed
//! boundary edges used for outline stitching are derived from the same
//! vertex list.
//!
//! Ambiguous (saddle) codes are resolved by [`crate::saddle`].

use arrayvec::ArrayVec;

use crate::cell::{Band, BandCell, CellCode, Corners, Trit};
use crate::edge::DirectedEdge;
use crate::edge::Crossing;
use crate::interpolate::Interpolation;
use crate::point::{Point, Side};
use crate::saddle::{center_state, Resolution, Saddle};

/// Corner of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    Bl,
    Br,
    Tr,
    Tl,
}

impl Corner {
    pub const fn point(self) -> Point {
        match self {
            Corner::Bl => Point::new(0.0, 0.0),
            Corner::Br => Point::new(1.0, 0.0),
            Corner::Tr => Point::new(1.0, 1.0),
            Corner::Tl => Point::new(0.0, 1.0),
        }
    }

    pub fn value(self, corners: &Corners) -> f64 {
        match self {
            Corner::Bl => corners.bl,
            Corner::Br => corners.br,
            Corner::Tr => corners.tr,
            Corner::Tl => corners.tl,
        }
    }
}

/// A polygon vertex: a cell corner, or a crossing on a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vertex {
    Corner(Corner),
    Cut(Side, Crossing),
}

impl Vertex {
    /// Cell-local position of the vertex.
    pub fn resolve(self, corners: &Corners, band: Band, interp: &Interpolation) -> Point {
        match self {
            Vertex::Corner(corner) => corner.point(),
            Vertex::Cut(side, crossing) => {
                let (a, b) = side_values(side, corners);
                let t = match crossing {
                    Crossing::Single => interp.single(a, b, band.min, band.max),
                    Crossing::First => interp.first(a, b, band.min, band.max),
                    Crossing::Second => interp.second(a, b, band.min, band.max),
                };
                side.at(t)
            }
        }
    }
}

/// Sample values at the low and high end of a side.
fn side_values(side: Side, c: &Corners) -> (f64, f64) {
    let (lo, hi) = match side {
        Side::Bottom => (Corner::Bl, Corner::Br),
        Side::Right => (Corner::Br, Corner::Tr),
        Side::Top => (Corner::Tl, Corner::Tr),
        Side::Left => (Corner::Bl, Corner::Tl),
    };
    (lo.value(c), hi.value(c))
}

/// Broad geometric family of a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    Square,
    Triangle,
    /// Single straight cut across the cell
    Trapezoid,
    /// Band strip around one corner
    Quadrilateral,
    /// Band strip crossing the whole cell
    Rectangle,
    Pentagon,
    Hexagon,
    Heptagon,
    Octagon,
}

/// Every polygon the table can emit.
///
/// Suffixes name the corner or sides the shape is built around, e.g.
/// `TriangleBl` keeps the bottom-left corner and `TetragonLr` is a strip
/// from the left side to the right side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Square,
    TriangleBl,
    TriangleBr,
    TriangleTr,
    TriangleTl,
    TetragonT,
    TetragonR,
    TetragonB,
    TetragonL,
    TetragonBl,
    TetragonBr,
    TetragonTr,
    TetragonTl,
    TetragonLr,
    TetragonTb,
    PentagonTr,
    PentagonTl,
    PentagonBr,
    PentagonBl,
    PentagonTrRl,
    PentagonRbBt,
    PentagonBlLr,
    PentagonLtTb,
    PentagonBlTb,
    PentagonLtRl,
    PentagonTrBt,
    PentagonRbLr,
    HexagonLtTr,
    HexagonBlLt,
    HexagonBlRb,
    HexagonTrRb,
    HexagonLtRb,
    HexagonBlTr,
    HeptagonTr,
    HeptagonBl,
    HeptagonTl,
    HeptagonBr,
    Octagon,
}

const BL: Vertex = Vertex::Corner(Corner::Bl);
const BR: Vertex = Vertex::Corner(Corner::Br);
const TR: Vertex = Vertex::Corner(Corner::Tr);
const TL: Vertex = Vertex::Corner(Corner::Tl);

const B: Vertex = Vertex::Cut(Side::Bottom, Crossing::Single);
const B1: Vertex = Vertex::Cut(Side::Bottom, Crossing::First);
const B2: Vertex = Vertex::Cut(Side::Bottom, Crossing::Second);
const R: Vertex = Vertex::Cut(Side::Right, Crossing::Single);
const R1: Vertex = Vertex::Cut(Side::Right, Crossing::First);
const R2: Vertex = Vertex::Cut(Side::Right, Crossing::Second);
const T: Vertex = Vertex::Cut(Side::Top, Crossing::Single);
const T1: Vertex = Vertex::Cut(Side::Top, Crossing::First);
const T2: Vertex = Vertex::Cut(Side::Top, Crossing::Second);
const L: Vertex = Vertex::Cut(Side::Left, Crossing::Single);
const L1: Vertex = Vertex::Cut(Side::Left, Crossing::First);
const L2: Vertex = Vertex::Cut(Side::Left, Crossing::Second);

impl Shape {
    /// Clockwise vertex list (y up).
    pub const fn vertices(self) -> &'static [Vertex] {
        match self {
            Shape::Square => &[BL, TL, TR, BR],
            Shape::TriangleBl => &[L, B, BL],
            Shape::TriangleBr => &[B, R, BR],
            Shape::TriangleTr => &[R, T, TR],
            Shape::TriangleTl => &[L, TL, T],
            Shape::TetragonT => &[L, TL, TR, R],
            Shape::TetragonR => &[B, T, TR, BR],
            Shape::TetragonB => &[BL, L, R, BR],
            Shape::TetragonL => &[BL, TL, T, B],
            Shape::TetragonBl => &[B1, L1, L2, B2],
            Shape::TetragonBr => &[B1, R2, R1, B2],
            Shape::TetragonTr => &[R1, T1, T2, R2],
            Shape::TetragonTl => &[T2, L1, L2, T1],
            Shape::TetragonLr => &[L1, L2, R2, R1],
            Shape::TetragonTb => &[B1, T1, T2, B2],
            Shape::PentagonTr => &[BL, TL, T, R, BR],
            Shape::PentagonTl => &[BL, L, T, TR, BR],
            Shape::PentagonBr => &[BL, TL, TR, R, B],
            Shape::PentagonBl => &[L, TL, TR, BR, B],
            Shape::PentagonTrRl => &[L, TL, T, R2, R1],
            Shape::PentagonRbBt => &[T, TR, R, B2, B1],
            Shape::PentagonBlLr => &[B, L1, L2, R, BR],
            Shape::PentagonLtTb => &[BL, L, T1, T2, B],
            Shape::PentagonBlTb => &[L, TL, T, B2, B1],
            Shape::PentagonLtRl => &[L1, L2, T, TR, R],
            Shape::PentagonTrBt => &[T1, T2, R, BR, B],
            Shape::PentagonRbLr => &[BL, L, R2, R1, B],
            Shape::HexagonLtTr => &[BL, L, T1, T2, R, BR],
            Shape::HexagonBlLt => &[B, L1, L2, T, TR, BR],
            Shape::HexagonBlRb => &[B1, L, TL, TR, R, B2],
            Shape::HexagonTrRb => &[BL, TL, T, R2, R1, B],
            Shape::HexagonLtRb => &[BL, L, T, TR, R, B],
            Shape::HexagonBlTr => &[B, L, TL, T, R, BR],
            Shape::HeptagonTr => &[B1, L1, L2, T, TR, R, B2],
            Shape::HeptagonBl => &[BL, L, T1, T2, R2, R1, B],
            Shape::HeptagonTl => &[B1, L, TL, T, R2, R1, B2],
            Shape::HeptagonBr => &[B, L1, L2, T1, T2, R, BR],
            Shape::Octagon => &[B1, L1, L2, T1, T2, R2, R1, B2],
        }
    }

    pub fn shape_type(self) -> ShapeType {
        match self {
            Shape::Square => ShapeType::Square,
            Shape::TriangleBl | Shape::TriangleBr | Shape::TriangleTr | Shape::TriangleTl => {
                ShapeType::Triangle
            }
            Shape::TetragonT | Shape::TetragonR | Shape::TetragonB | Shape::TetragonL => {
                ShapeType::Trapezoid
            }
            Shape::TetragonBl | Shape::TetragonBr | Shape::TetragonTr | Shape::TetragonTl => {
                ShapeType::Quadrilateral
            }
            Shape::TetragonLr | Shape::TetragonTb => ShapeType::Rectangle,
            Shape::PentagonTr
            | Shape::PentagonTl
            | Shape::PentagonBr
            | Shape::PentagonBl
            | Shape::PentagonTrRl
            | Shape::PentagonRbBt
            | Shape::PentagonBlLr
            | Shape::PentagonLtTb
            | Shape::PentagonBlTb
            | Shape::PentagonLtRl
            | Shape::PentagonTrBt
            | Shape::PentagonRbLr => ShapeType::Pentagon,
            Shape::HexagonLtTr
            | Shape::HexagonBlLt
            | Shape::HexagonBlRb
            | Shape::HexagonTrRb
            | Shape::HexagonLtRb
            | Shape::HexagonBlTr => ShapeType::Hexagon,
            Shape::HeptagonTr | Shape::HeptagonBl | Shape::HeptagonTl | Shape::HeptagonBr => {
                ShapeType::Heptagon
            }
            Shape::Octagon => ShapeType::Octagon,
        }
    }

    /// Resolve the vertices to cell-local points.
    pub fn polygon(self, corners: &Corners, band: Band, interp: &Interpolation) -> ArrayVec<Point, 8> {
        self.vertices()
            .iter()
            .map(|v| v.resolve(corners, band, interp))
            .collect()
    }

    /// Push the directed boundary edges of this shape onto `edges`.
    ///
    /// An edge is a polygon side joining crossings on two different cell
    /// sides; sides running along the cell border are not boundaries.
    fn push_edges(self, points: &[Point], edges: &mut ArrayVec<DirectedEdge, 4>) {
        let vertices = self.vertices();
        let n = vertices.len();
        for i in 0..n {
            let j = (i + 1) % n;
            if let (Vertex::Cut(from, a), Vertex::Cut(to, b)) = (vertices[i], vertices[j]) {
                if from != to {
                    edges.push(DirectedEdge::new(points[i], (from, a), points[j], (to, b)));
                }
            }
        }
    }
}

/// What a cell code maps to in the lookup table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry {
    /// All corners below, or all above: nothing to emit.
    Empty,
    Shape(Shape),
    /// Ambiguous code; topology depends on the cell center.
    Saddle(Saddle),
    /// A code with an invalid corner pattern.
    Unreachable,
}

const fn code(bl: u8, br: u8, tr: u8, tl: u8) -> usize {
    ((tl << 6) | (tr << 4) | (br << 2) | bl) as usize
}

const fn hexagon(connected: Shape, split: [Shape; 2], split_on: Trit) -> Entry {
    Entry::Saddle(Saddle::Hexagon {
        connected,
        split,
        split_on,
    })
}

const fn heptagon(connected: Shape, split: [Shape; 2], split_on: Trit) -> Entry {
    Entry::Saddle(Saddle::Heptagon {
        connected,
        split,
        split_on,
    })
}

const fn build_table() -> [Entry; 256] {
    let mut t = [Entry::Unreachable; 256];

    t[code(0, 0, 0, 0)] = Entry::Empty;
    t[code(2, 2, 2, 2)] = Entry::Empty;
    t[code(1, 1, 1, 1)] = Entry::Shape(Shape::Square);

    // single corner within
    t[169] = Entry::Shape(Shape::TriangleBl);
    t[1] = Entry::Shape(Shape::TriangleBl);
    t[166] = Entry::Shape(Shape::TriangleBr);
    t[4] = Entry::Shape(Shape::TriangleBr);
    t[154] = Entry::Shape(Shape::TriangleTr);
    t[16] = Entry::Shape(Shape::TriangleTr);
    t[106] = Entry::Shape(Shape::TriangleTl);
    t[64] = Entry::Shape(Shape::TriangleTl);

    // one corner across the band from the other three
    t[168] = Entry::Shape(Shape::TetragonBl);
    t[2] = Entry::Shape(Shape::TetragonBl);
    t[162] = Entry::Shape(Shape::TetragonBr);
    t[8] = Entry::Shape(Shape::TetragonBr);
    t[138] = Entry::Shape(Shape::TetragonTr);
    t[32] = Entry::Shape(Shape::TetragonTr);
    t[42] = Entry::Shape(Shape::TetragonTl);
    t[128] = Entry::Shape(Shape::TetragonTl);

    // straight cut, one side within
    t[5] = Entry::Shape(Shape::TetragonB);
    t[165] = Entry::Shape(Shape::TetragonB);
    t[20] = Entry::Shape(Shape::TetragonR);
    t[150] = Entry::Shape(Shape::TetragonR);
    t[80] = Entry::Shape(Shape::TetragonT);
    t[90] = Entry::Shape(Shape::TetragonT);
    t[65] = Entry::Shape(Shape::TetragonL);
    t[105] = Entry::Shape(Shape::TetragonL);

    // strip across the cell
    t[160] = Entry::Shape(Shape::TetragonLr);
    t[10] = Entry::Shape(Shape::TetragonLr);
    t[130] = Entry::Shape(Shape::TetragonTb);
    t[40] = Entry::Shape(Shape::TetragonTb);

    // single corner outside
    t[101] = Entry::Shape(Shape::PentagonTr);
    t[69] = Entry::Shape(Shape::PentagonTr);
    t[149] = Entry::Shape(Shape::PentagonTl);
    t[21] = Entry::Shape(Shape::PentagonTl);
    t[86] = Entry::Shape(Shape::PentagonBl);
    t[84] = Entry::Shape(Shape::PentagonBl);
    t[89] = Entry::Shape(Shape::PentagonBr);
    t[81] = Entry::Shape(Shape::PentagonBr);

    // single corner within, neighbours split below/above
    t[96] = Entry::Shape(Shape::PentagonTrRl);
    t[74] = Entry::Shape(Shape::PentagonTrRl);
    t[24] = Entry::Shape(Shape::PentagonRbBt);
    t[146] = Entry::Shape(Shape::PentagonRbBt);
    t[6] = Entry::Shape(Shape::PentagonBlLr);
    t[164] = Entry::Shape(Shape::PentagonBlLr);
    t[129] = Entry::Shape(Shape::PentagonLtTb);
    t[41] = Entry::Shape(Shape::PentagonLtTb);
    t[66] = Entry::Shape(Shape::PentagonBlTb);
    t[104] = Entry::Shape(Shape::PentagonBlTb);
    t[144] = Entry::Shape(Shape::PentagonLtRl);
    t[26] = Entry::Shape(Shape::PentagonLtRl);
    t[36] = Entry::Shape(Shape::PentagonTrBt);
    t[134] = Entry::Shape(Shape::PentagonTrBt);
    t[9] = Entry::Shape(Shape::PentagonRbLr);
    t[161] = Entry::Shape(Shape::PentagonRbLr);

    // two adjacent corners within
    t[37] = Entry::Shape(Shape::HexagonLtTr);
    t[133] = Entry::Shape(Shape::HexagonLtTr);
    t[148] = Entry::Shape(Shape::HexagonBlLt);
    t[22] = Entry::Shape(Shape::HexagonBlLt);
    t[82] = Entry::Shape(Shape::HexagonBlRb);
    t[88] = Entry::Shape(Shape::HexagonBlRb);
    t[73] = Entry::Shape(Shape::HexagonTrRb);
    t[97] = Entry::Shape(Shape::HexagonTrRb);

    // two opposite corners within, the others on one side
    t[145] = Entry::Shape(Shape::HexagonLtRb);
    t[25] = Entry::Shape(Shape::HexagonLtRb);
    t[70] = Entry::Shape(Shape::HexagonBlTr);
    t[100] = Entry::Shape(Shape::HexagonBlTr);

    // opposite corners within, the others both below or both above
    let bl_tr = [Shape::TriangleBl, Shape::TriangleTr];
    let br_tl = [Shape::TriangleTl, Shape::TriangleBr];
    t[17] = hexagon(Shape::HexagonLtRb, bl_tr, Trit::Below);
    t[153] = hexagon(Shape::HexagonLtRb, bl_tr, Trit::Above);
    t[68] = hexagon(Shape::HexagonBlTr, br_tl, Trit::Below);
    t[102] = hexagon(Shape::HexagonBlTr, br_tl, Trit::Above);

    // one diagonal shares a state outside the band
    let tr = [Shape::TriangleTr, Shape::TetragonBl];
    let bl = [Shape::TriangleBl, Shape::TetragonTr];
    let tl = [Shape::TriangleTl, Shape::TetragonBr];
    let br = [Shape::TriangleBr, Shape::TetragonTl];
    t[152] = heptagon(Shape::HeptagonTr, tr, Trit::Above);
    t[18] = heptagon(Shape::HeptagonTr, tr, Trit::Below);
    t[137] = heptagon(Shape::HeptagonBl, bl, Trit::Above);
    t[33] = heptagon(Shape::HeptagonBl, bl, Trit::Below);
    t[98] = heptagon(Shape::HeptagonTl, tl, Trit::Above);
    t[72] = heptagon(Shape::HeptagonTl, tl, Trit::Below);
    t[38] = heptagon(Shape::HeptagonBr, br, Trit::Above);
    t[132] = heptagon(Shape::HeptagonBr, br, Trit::Below);

    // both diagonals outside, in opposite states
    let around_tl_br = [Shape::TetragonTl, Shape::TetragonBr];
    let around_bl_tr = [Shape::TetragonBl, Shape::TetragonTr];
    t[136] = Entry::Saddle(Saddle::Octagon {
        below: around_tl_br,
        above: around_bl_tr,
    });
    t[34] = Entry::Saddle(Saddle::Octagon {
        below: around_bl_tr,
        above: around_tl_br,
    });

    t
}

static TABLE: [Entry; 256] = build_table();

/// Look up the table entry for a cell code.
#[inline]
pub fn lookup(code: CellCode) -> Entry {
    TABLE[code.raw() as usize]
}

/// Which outputs to compute for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputMode {
    pub polygons: bool,
    pub outline: bool,
}

impl OutputMode {
    pub const POLYGONS: Self = Self {
        polygons: true,
        outline: false,
    };
    pub const OUTLINE: Self = Self {
        polygons: false,
        outline: true,
    };
}

/// Everything one cell contributes to a band, in cell-local coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellGeometry {
    pub polygons: ArrayVec<ArrayVec<Point, 8>, 2>,
    pub edges: ArrayVec<DirectedEdge, 4>,
}

impl CellGeometry {
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty() && self.edges.is_empty()
    }
}

/// The shapes a classified cell emits, after saddle resolution.
pub fn shapes(cell: &BandCell, band: Band) -> ArrayVec<Shape, 2> {
    let mut out = ArrayVec::new();
    match lookup(cell.code) {
        Entry::Empty | Entry::Unreachable => {}
        Entry::Shape(shape) => out.push(shape),
        Entry::Saddle(saddle) => match saddle.resolve(center_state(&cell.corners, band)) {
            Resolution::Connected(shape) => out.push(shape),
            Resolution::Split(pair) => out.extend(pair),
        },
    }
    out
}

/// Compute the geometry of a classified cell.
pub fn geometry(cell: &BandCell, band: Band, interp: &Interpolation, mode: OutputMode) -> CellGeometry {
    let mut geometry = CellGeometry::default();

    for shape in shapes(cell, band) {
        let points = shape.polygon(&cell.corners, band, interp);
        if mode.outline {
            shape.push_edges(&points, &mut geometry.edges);
        }
        if mode.polygons {
            geometry.polygons.push(points);
        }
    }

    geometry
}
