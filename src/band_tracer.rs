//! Boundary stitching for outline mode.
//!
//! Collects the directed edges of every active cell of one band and joins
//! them into closed rings. Rings are traced with the band on the right-hand
//! side, so outer boundaries run clockwise and holes counter-clockwise
//! (y up).
//!
//! Cells never emit edges along the boundary of the data: the outer rim of
//! the grid and the sides facing a gap (a cell touching a missing sample).
//! When a traversal crosses that boundary it follows it with the data on its
//! right, adding each corner where the boundary turns, until it reaches the
//! next edge that starts on the boundary. Boundary loops lying wholly inside
//! the band have no edge at all and are traced separately, so the outline
//! covers exactly the cells that hold data.

use std::collections::{BTreeMap, HashSet};

use arrayvec::ArrayVec;
use tracing::{debug, warn};

use crate::cell::{Band, Trit};
use crate::edge::{DirectedEdge, Slot};
use crate::grid::Grid;
use crate::point::{Point, Ring, Side};

/// Edge position within the traced band: cell column, cell row, slot.
type EdgeKey = (usize, usize, Slot);

/// One side of a cell on the data boundary.
type BoundarySide = (usize, usize, Side);

#[derive(Debug, Clone, Copy)]
struct Pending {
    edge: DirectedEdge,
    consumed: bool,
}

/// Statistics of one assembly run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceReport {
    pub rings: usize,
    pub open_rings: usize,
    pub edges_added: usize,
    pub edges_consumed: usize,
}

/// Stitches per-cell directed edges of one band into rings.
#[derive(Debug)]
pub struct BandTracer<'a> {
    grid: &'a Grid,
    band: Band,
    cells: BTreeMap<(usize, usize), ArrayVec<Pending, 4>>,
    walked: HashSet<BoundarySide>,
    report: TraceReport,
}

/// Sample positions at the start and the end of `side` of cell `(x, y)`,
/// in clockwise order around the cell.
fn side_ends(x: usize, y: usize, side: Side) -> ((usize, usize), (usize, usize)) {
    match side {
        Side::Top => ((x, y + 1), (x + 1, y + 1)),
        Side::Right => ((x + 1, y + 1), (x + 1, y)),
        Side::Bottom => ((x + 1, y), (x, y)),
        Side::Left => ((x, y), (x, y + 1)),
    }
}

fn grid_point((x, y): (usize, usize)) -> Point {
    Point::new(x as f64, y as f64)
}

impl<'a> BandTracer<'a> {
    /// Tracer for `band` over the cells of `grid`.
    pub fn new(grid: &'a Grid, band: Band) -> Self {
        Self {
            grid,
            band,
            cells: BTreeMap::new(),
            walked: HashSet::new(),
            report: TraceReport::default(),
        }
    }

    /// Register the edges of cell `(x, y)`. Cells without edges are ignored.
    pub fn add_cell(&mut self, x: usize, y: usize, edges: impl IntoIterator<Item = DirectedEdge>) {
        let pending: ArrayVec<Pending, 4> = edges
            .into_iter()
            .map(|edge| Pending { edge, consumed: false })
            .collect();
        if pending.is_empty() {
            return;
        }
        self.report.edges_added += pending.len();
        self.cells.insert((x, y), pending);
    }

    pub fn report(&self) -> TraceReport {
        self.report
    }

    /// Trace every registered edge into rings.
    ///
    /// Cells are visited column by column; within a cell the slots are tried
    /// in [`Slot::START_ORDER`]. Boundary loops without edges (the grid
    /// frame, when the whole rim is inside the band) lead the result.
    pub fn assemble(&mut self) -> Vec<Ring> {
        let mut traced = Vec::new();

        let keys: Vec<(usize, usize)> = self.cells.keys().copied().collect();
        for (x, y) in keys {
            for slot in Slot::START_ORDER {
                if self.is_available((x, y, slot)) {
                    traced.extend(self.trace((x, y, slot)));
                }
            }
        }

        let mut rings = self.edgeless_loops();
        rings.append(&mut traced);

        self.report.rings = rings.len();
        debug!(
            rings = self.report.rings,
            open = self.report.open_rings,
            edges = self.report.edges_added,
            consumed = self.report.edges_consumed,
            "assembled band outline"
        );
        rings
    }

    fn pending(&self, (x, y, slot): EdgeKey) -> Option<&Pending> {
        self.cells.get(&(x, y))?.iter().find(|p| p.edge.slot() == slot)
    }

    fn is_available(&self, key: EdgeKey) -> bool {
        self.pending(key).is_some_and(|p| !p.consumed)
    }

    /// Mark an edge consumed and return it.
    fn take(&mut self, (x, y, slot): EdgeKey) -> Option<DirectedEdge> {
        let pending = self
            .cells
            .get_mut(&(x, y))?
            .iter_mut()
            .find(|p| p.edge.slot() == slot && !p.consumed)?;
        pending.consumed = true;
        self.report.edges_consumed += 1;
        Some(pending.edge)
    }

    /// The cell across `side` of `(x, y)`, if it lies inside the grid.
    fn adjacent(&self, x: usize, y: usize, side: Side) -> Option<(usize, usize)> {
        match side {
            Side::Right => (x + 1 < self.grid.cell_cols()).then_some((x + 1, y)),
            Side::Top => (y + 1 < self.grid.cell_rows()).then_some((x, y + 1)),
            Side::Left => x.checked_sub(1).map(|x| (x, y)),
            Side::Bottom => y.checked_sub(1).map(|y| (x, y)),
        }
    }

    /// The cell across `side` of `(x, y)`, if it holds data.
    fn neighbor(&self, x: usize, y: usize, side: Side) -> Option<(usize, usize)> {
        self.adjacent(x, y, side).filter(|&(nx, ny)| self.grid.has_data(nx, ny))
    }

    /// Upper bound on the number of boundary sides.
    fn boundary_limit(&self) -> usize {
        2 * (self.grid.cell_cols() + self.grid.cell_rows()) + 4 * self.grid.gaps().len() + 4
    }

    /// Trace the ring through `start`. Closed rings that collapse to fewer
    /// than three distinct points have no area and are dropped.
    fn trace(&mut self, start: EdgeKey) -> Option<Ring> {
        let mut ring = Ring::new();
        let mut current = start;

        let closed = loop {
            let Some(edge) = self.take(current) else {
                break false;
            };
            let (x, y, _) = current;
            ring.push(edge.start().offset(x, y));

            let next = match self.neighbor(x, y, edge.exit()) {
                Some((nx, ny)) => {
                    let next = (nx, ny, edge.enter());
                    if next != start && !self.is_available(next) {
                        // no matching edge waits in the neighbor
                        ring.push(edge.end().offset(x, y));
                        break false;
                    }
                    next
                }
                None => {
                    let exit = edge.end().offset(x, y);
                    ring.push(exit);
                    match self.walk_boundary((x, y, edge.exit()), exit, start, &mut ring) {
                        Some(next) => next,
                        None => break false,
                    }
                }
            };

            if next == start {
                break true;
            }
            current = next;
        };

        if !closed {
            self.report.open_rings += 1;
            warn!(x = start.0, y = start.1, slot = start.2.name(), "outline ring left open");
        }

        ring.dedup();
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        (!closed || ring.len() >= 3).then_some(ring)
    }

    /// Step past the end of boundary side `(x, y, side)` onto the next one.
    ///
    /// Returns the next side and whether the boundary turns in between.
    fn advance(&self, (x, y, side): BoundarySide) -> (BoundarySide, bool) {
        let ahead = side.clockwise();
        let Some((nx, ny)) = self.neighbor(x, y, ahead) else {
            return ((x, y, ahead), true);
        };
        match self.neighbor(nx, ny, side) {
            None => ((nx, ny, side), false),
            Some((mx, my)) => ((mx, my, ahead.opposite()), true),
        }
    }

    /// Follow the data boundary from `pos` on `at` until an edge starting
    /// on the boundary is found.
    fn walk_boundary(
        &mut self,
        mut at: BoundarySide,
        mut pos: Point,
        start: EdgeKey,
        ring: &mut Ring,
    ) -> Option<EdgeKey> {
        for _ in 0..=self.boundary_limit() {
            self.walked.insert(at);
            let (x, y, side) = at;
            if let Some(slot) = self.nearest_on_boundary(x, y, side, pos, start) {
                return Some((x, y, slot));
            }

            let corner = grid_point(side_ends(x, y, side).1);
            let (next, turns) = self.advance(at);
            if turns {
                ring.push(corner);
            }
            at = next;
            pos = corner;
        }
        None
    }

    /// The closest unconsumed edge starting on `side` of cell `(x, y)` at or
    /// past `pos` in the walking direction. The ring's own start edge also
    /// counts, which is how a ring through the boundary closes.
    fn nearest_on_boundary(&self, x: usize, y: usize, side: Side, pos: Point, start: EdgeKey) -> Option<Slot> {
        let cell = self.cells.get(&(x, y))?;
        cell.iter()
            .filter(|p| p.edge.slot().side() == side)
            .filter(|p| !p.consumed || (x, y, p.edge.slot()) == start)
            .filter_map(|p| {
                let s = p.edge.start().offset(x, y);
                let ahead = match side {
                    Side::Top => s.x() >= pos.x(),
                    Side::Right => s.y() <= pos.y(),
                    Side::Bottom => s.x() <= pos.x(),
                    Side::Left => s.y() >= pos.y(),
                };
                ahead.then(|| ((s.x() - pos.x()).abs() + (s.y() - pos.y()).abs(), p.edge.slot()))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, slot)| slot)
    }

    fn within(&self, (x, y): (usize, usize)) -> bool {
        Trit::classify(self.grid.value(x, y), self.band) == Trit::Within
    }

    /// Boundary loops no edge reaches whose samples all lie in the band.
    ///
    /// A loop with a crossing anywhere has all of its in-band stretches
    /// walked while tracing edges, so any unwalked side whose ends are both
    /// within belongs to a loop without crossings.
    fn edgeless_loops(&mut self) -> Vec<Ring> {
        let (cols, rows) = (self.grid.cell_cols(), self.grid.cell_rows());
        let mut candidates: Vec<BoundarySide> = (0..rows)
            .map(|y| (0, y, Side::Left))
            .chain((0..cols).map(|x| (x, rows - 1, Side::Top)))
            .chain((0..rows).rev().map(|y| (cols - 1, y, Side::Right)))
            .chain((0..cols).rev().map(|x| (x, 0, Side::Bottom)))
            .collect();
        for &(gx, gy) in self.grid.gaps() {
            for side in [Side::Bottom, Side::Right, Side::Top, Side::Left] {
                if let Some((x, y)) = self.adjacent(gx, gy, side) {
                    candidates.push((x, y, side.opposite()));
                }
            }
        }

        let mut rings = Vec::new();
        for at in candidates {
            let (x, y, side) = at;
            if self.walked.contains(&at) || !self.grid.has_data(x, y) || self.neighbor(x, y, side).is_some() {
                continue;
            }
            let (near, far) = side_ends(x, y, side);
            if self.within(near) && self.within(far) {
                rings.push(self.trace_loop(at));
            }
        }
        rings
    }

    /// Walk a whole boundary loop from the start of `first`, keeping only
    /// the corners where it turns.
    fn trace_loop(&mut self, first: BoundarySide) -> Ring {
        let mut ring = Ring::new();
        let mut at = first;
        for _ in 0..=self.boundary_limit() {
            self.walked.insert(at);
            let (x, y, side) = at;
            let corner = grid_point(side_ends(x, y, side).1);
            let (next, turns) = self.advance(at);
            if turns {
                ring.push(corner);
            }
            at = next;
            if at == first {
                break;
            }
        }

        // the turn onto `first` is found last; lead with it
        let (x, y, side) = first;
        if ring.last() == Some(&grid_point(side_ends(x, y, side).0)) {
            ring.rotate_right(1);
        }
        ring
    }
}
