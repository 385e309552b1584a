use crate::point::{Point, Side};

/// Which band-limit crossing on a cell side a point sits at.
///
/// A side whose corners are one state apart (below/within or within/above)
/// is crossed once. A side running from below to above is crossed twice;
/// `First` is the crossing at the lower coordinate, `Second` the higher one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Crossing {
    Single,
    First,
    Second,
}

/// Named slot of a directed boundary edge within a cell.
///
/// The first letter is the side the edge starts on, the second which
/// crossing of that side. Sides with a single crossing always use `Br`,
/// `Rt`, `Tl` or `Lb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Bl,
    Br,
    Rb,
    Rt,
    Tl,
    Tr,
    Lb,
    Lt,
}

impl Slot {
    /// Order in which a cell's slots are tried as ring starts.
    pub const START_ORDER: [Slot; 8] = [
        Slot::Bl,
        Slot::Lb,
        Slot::Lt,
        Slot::Tl,
        Slot::Tr,
        Slot::Rt,
        Slot::Rb,
        Slot::Br,
    ];

    /// Slot for an edge starting at `crossing` on `side`.
    pub const fn at(side: Side, crossing: Crossing) -> Self {
        match (side, crossing) {
            (Side::Bottom, Crossing::First) => Slot::Bl,
            (Side::Bottom, Crossing::Single | Crossing::Second) => Slot::Br,
            (Side::Right, Crossing::First) => Slot::Rb,
            (Side::Right, Crossing::Single | Crossing::Second) => Slot::Rt,
            (Side::Top, Crossing::Single | Crossing::First) => Slot::Tl,
            (Side::Top, Crossing::Second) => Slot::Tr,
            (Side::Left, Crossing::Single | Crossing::First) => Slot::Lb,
            (Side::Left, Crossing::Second) => Slot::Lt,
        }
    }

    /// Side the edge in this slot starts on.
    pub const fn side(self) -> Side {
        match self {
            Slot::Bl | Slot::Br => Side::Bottom,
            Slot::Rb | Slot::Rt => Side::Right,
            Slot::Tl | Slot::Tr => Side::Top,
            Slot::Lb | Slot::Lt => Side::Left,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Slot::Bl => "bl",
            Slot::Br => "br",
            Slot::Rb => "rb",
            Slot::Rt => "rt",
            Slot::Tl => "tl",
            Slot::Tr => "tr",
            Slot::Lb => "lb",
            Slot::Lt => "lt",
        }
    }
}

/// Direction to move to the neighbor cell that continues a boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Right, // column++
    Up,    // row++
    Left,  // column--
    Down,  // row--
}

impl Move {
    /// Move across the given side of a cell.
    pub const fn across(side: Side) -> Self {
        match side {
            Side::Right => Move::Right,
            Side::Top => Move::Up,
            Side::Left => Move::Left,
            Side::Bottom => Move::Down,
        }
    }

    /// Column and row offset of the neighbor cell.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Move::Right => (1, 0),
            Move::Up => (0, 1),
            Move::Left => (-1, 0),
            Move::Down => (0, -1),
        }
    }
}

/// A directed boundary fragment inside one cell.
///
/// Endpoints are cell-local. Following the edge to its end and continuing in
/// the neighbor at `step` from the slot `enter` traces the same physical
/// boundary, with the band's interior always on the right-hand side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectedEdge {
    slot: Slot,
    start: Point,
    end: Point,
    exit: Side,
    enter: Slot,
}

impl DirectedEdge {
    /// Edge from `start` (at `from` crossing on its side) to `end` (at `to`).
    pub fn new(start: Point, from: (Side, Crossing), end: Point, to: (Side, Crossing)) -> Self {
        Self {
            slot: Slot::at(from.0, from.1),
            start,
            end,
            exit: to.0,
            enter: Slot::at(to.0.opposite(), to.1),
        }
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Side of the cell the edge leaves through.
    pub fn exit(&self) -> Side {
        self.exit
    }

    pub fn step(&self) -> Move {
        Move::across(self.exit)
    }

    /// Slot of the neighbor cell that continues this edge.
    pub fn enter(&self) -> Slot {
        self.enter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_crossing_slot_names() {
        assert_eq!(Slot::at(Side::Bottom, Crossing::Single), Slot::Br);
        assert_eq!(Slot::at(Side::Right, Crossing::Single), Slot::Rt);
        assert_eq!(Slot::at(Side::Top, Crossing::Single), Slot::Tl);
        assert_eq!(Slot::at(Side::Left, Crossing::Single), Slot::Lb);
    }

    #[test]
    fn test_slot_sides_round_trip() {
        for slot in Slot::START_ORDER {
            let side = slot.side();
            let matches = [Crossing::First, Crossing::Second]
                .into_iter()
                .any(|c| Slot::at(side, c) == slot);
            assert!(matches, "slot {} is not reachable from its side", slot.name());
        }
    }

    #[test]
    fn test_edge_with_move() {
        // lower-left triangle: from the left side down to the bottom side
        let edge = DirectedEdge::new(
            Point::new(0.0, 0.5),
            (Side::Left, Crossing::Single),
            Point::new(0.5, 0.0),
            (Side::Bottom, Crossing::Single),
        );

        assert_eq!(edge.slot(), Slot::Lb);
        assert_eq!(edge.step(), Move::Down);
        assert_eq!(edge.step().delta(), (0, -1));
        assert_eq!(edge.enter(), Slot::Tl);
    }

    #[test]
    fn test_double_crossing_enter_keeps_position() {
        // the upper crossing of a right side is the upper crossing of the
        // neighbor's left side
        let edge = DirectedEdge::new(
            Point::new(0.2, 0.0),
            (Side::Bottom, Crossing::First),
            Point::new(1.0, 0.7),
            (Side::Right, Crossing::Second),
        );
        assert_eq!(edge.slot(), Slot::Bl);
        assert_eq!(edge.step(), Move::Right);
        assert_eq!(edge.enter(), Slot::Lt);
    }
}
