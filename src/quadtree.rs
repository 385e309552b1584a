//! Min/max quadtree over the cells of a grid.
//!
//! Every node covers a rectangle of cells and caches the smallest and
//! largest sample among all their corners. A band query descends only into
//! nodes whose value range overlaps the band, so repeated queries over one
//! field cost roughly in proportion to the number of cells they return.
//!
//! Nodes are split at the largest power of two strictly below their extent,
//! which keeps sibling boundaries aligned on binary offsets. A node that is
//! a single cell wide or tall only splits in the other direction.

use arrayvec::ArrayVec;

use crate::cell::Band;
use crate::error::{IsobandError, Result};
use crate::grid::Grid;

/// Address of one cell returned by a band query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    pub x: usize,
    pub y: usize,
}

#[derive(Debug, Clone)]
struct Node {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    min: f64,
    max: f64,
    children: ArrayVec<usize, 4>,
}

impl Node {
    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// No finite sample anywhere under this node.
    fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Every sample under this node lies strictly inside the band.
    fn subsumed_by(&self, band: Band) -> bool {
        self.min > band.min && self.max < band.max
    }
}

/// Largest power of two strictly below `extent` (or `extent` itself when 1).
fn split(extent: usize) -> usize {
    if extent <= 1 {
        extent
    } else {
        1 << (usize::BITS - 1 - (extent - 1).leading_zeros())
    }
}

/// Node arena built over a borrowed grid.
#[derive(Debug, Clone)]
pub(crate) struct CellIndex {
    nodes: Vec<Node>,
}

impl CellIndex {
    pub(crate) fn build(grid: &Grid) -> Self {
        let mut index = Self { nodes: Vec::new() };
        index.build_node(grid, 0, 0, grid.cell_cols(), grid.cell_rows());
        index
    }

    fn build_node(&mut self, grid: &Grid, x: usize, y: usize, width: usize, height: usize) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node {
            x,
            y,
            width,
            height,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            children: ArrayVec::new(),
        });

        let (min, max) = if width == 1 && height == 1 {
            let c = grid.corners(x, y);
            [c.bl, c.br, c.tr, c.tl]
                .into_iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
        } else {
            let hx = split(width);
            let hy = split(height);

            let mut children = ArrayVec::<usize, 4>::new();
            children.push(self.build_node(grid, x, y, hx, hy));
            if width > hx {
                children.push(self.build_node(grid, x + hx, y, width - hx, hy));
            }
            if height > hy {
                children.push(self.build_node(grid, x, y + hy, hx, height - hy));
            }
            if width > hx && height > hy {
                children.push(self.build_node(grid, x + hx, y + hy, width - hx, height - hy));
            }

            let range = children.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &c| {
                (lo.min(self.nodes[c].min), hi.max(self.nodes[c].max))
            });
            self.nodes[id].children = children;
            range
        };

        self.nodes[id].min = min;
        self.nodes[id].max = max;
        id
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Value range of the whole grid, ignoring missing samples.
    pub(crate) fn range(&self) -> Option<(f64, f64)> {
        self.nodes
            .first()
            .filter(|root| !root.is_empty())
            .map(|root| (root.min, root.max))
    }

    /// Cells that can intersect `band`, depth first.
    ///
    /// With `include_subsumed` unset, cells whose corners all lie strictly
    /// inside the band are skipped: they add area but no boundary.
    pub(crate) fn cells_in_band(&self, band: Band, include_subsumed: bool) -> Vec<CellRef> {
        let mut cells = Vec::new();
        let mut stack = vec![0];

        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if node.is_empty() || !band.overlaps(node.min, node.max) {
                continue;
            }
            if !include_subsumed && node.subsumed_by(band) {
                continue;
            }

            if node.is_leaf() {
                debug_assert!(node.width == 1 && node.height == 1);
                cells.push(CellRef { x: node.x, y: node.y });
            } else {
                stack.extend(node.children.iter().rev());
            }
        }

        cells
    }
}

/// A grid together with its min/max quadtree.
///
/// Build it once and reuse it for any number of bands, from any number of
/// threads.
///
/// # Example
///
/// ```
/// use geo_isobands::{Grid, QuadTree};
///
/// let grid = Grid::from_rows(vec![
///     vec![0.0, 0.0, 0.0],
///     vec![0.0, 9.0, 0.0],
///     vec![0.0, 0.0, 0.0],
/// ]).unwrap();
/// let tree = QuadTree::new(grid);
///
/// // only the four cells around the peak reach 8..10
/// assert_eq!(tree.cells_in_band(8.0, 10.0, true).len(), 4);
/// assert!(tree.cells_in_band(20.0, 30.0, true).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct QuadTree {
    grid: Grid,
    index: CellIndex,
}

impl QuadTree {
    pub fn new(grid: Grid) -> Self {
        let index = CellIndex::build(&grid);
        Self { grid, index }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn index(&self) -> &CellIndex {
        &self.index
    }

    pub fn node_count(&self) -> usize {
        self.index.node_count()
    }

    /// Smallest and largest non-missing sample, or `None` if none exist.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.index.range()
    }

    /// Cells whose corner range overlaps `[min, max]`.
    pub fn cells_in_band(&self, min: f64, max: f64, include_subsumed: bool) -> Vec<CellRef> {
        self.index.cells_in_band(Band::new(min, max), include_subsumed)
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

impl TryFrom<Vec<Vec<f64>>> for QuadTree {
    type Error = IsobandError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Grid::from_rows(rows).map(Self::new)
    }
}

impl From<Grid> for QuadTree {
    fn from(grid: Grid) -> Self {
        Self::new(grid)
    }
}
