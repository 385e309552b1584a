/// Side of a cell, in a frame where `y` grows toward the top
/// (the top side of cell `(x, y)` is shared with cell `(x, y + 1)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Bottom,
    Right,
    Top,
    Left,
}

impl Side {
    /// The side across the shared cell edge.
    pub fn opposite(self) -> Self {
        match self {
            Side::Bottom => Side::Top,
            Side::Right => Side::Left,
            Side::Top => Side::Bottom,
            Side::Left => Side::Right,
        }
    }

    /// Next side clockwise around a cell. Also the direction a clockwise
    /// walk along this side heads in.
    pub fn clockwise(self) -> Self {
        match self {
            Side::Top => Side::Right,
            Side::Right => Side::Bottom,
            Side::Bottom => Side::Left,
            Side::Left => Side::Top,
        }
    }

    /// Point at fraction `t` along this side of the unit square.
    ///
    /// `t` runs from the lower coordinate to the higher one: left to right
    /// for bottom/top, bottom to top for left/right.
    pub fn at(self, t: f64) -> Point {
        match self {
            Side::Bottom => Point::new(t, 0.0),
            Side::Right => Point::new(1.0, t),
            Side::Top => Point::new(t, 1.0),
            Side::Left => Point::new(0.0, t),
        }
    }
}

/// A point in grid space.
///
/// Cell-local points live in the unit square `[0,1]×[0,1]`; absolute points
/// are offset by the cell's column and row.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Translate a cell-local point by the cell's grid position.
    #[inline]
    pub fn offset(self, x: usize, y: usize) -> Self {
        Self::new(self.x + x as f64, self.y + y as f64)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// A closed polygon boundary; the last point implicitly connects to the first
/// unless the `linear_ring` option repeats it explicitly.
pub type Ring = Vec<Point>;

/// Twice the signed area of a ring (positive when counter-clockwise, y up).
pub fn signed_area2(ring: &[Point]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    ring.iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum()
}
