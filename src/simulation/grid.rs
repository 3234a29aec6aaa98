//! Uniform spatial hash grid used as the collision broad phase
//!
//! The grid maps axis-aligned bounding boxes to the ranges of cells
//! they overlap. Cell membership is a sparse ordered map, so indices
//! are not clamped to the declared extent: a particle outside the
//! nominal bounds simply lands in a cell key outside the expected
//! range and the grid behaves as logically unbounded. Ordered
//! containers keep the iteration order of members deterministic,
//! which the simulation relies on for reproducible runs.
//!
//! Each client caches the cell range it was last inserted under, so a
//! slow mover whose bounding box stays inside the same cells updates
//! for free.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::simulation::particle::ParticleId;
use crate::simulation::vec2::Vect;

/// (row, col) cell key. Row indexes along y, col along x.
pub type CellIndex = (i32, i32);

/// Cached cell-index range `[min, max]` for one client, matching its
/// last-inserted bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellRange {
    min: CellIndex,
    max: CellIndex,
}

#[derive(Debug, Clone)]
pub struct SpatialHashGrid {
    origin: Vect,
    extents: Vect,
    cell_dims: Vect,
    rows: i32,
    cols: i32,

    cells: BTreeMap<CellIndex, BTreeSet<ParticleId>>,
    clients: HashMap<ParticleId, CellRange>,
}

impl SpatialHashGrid {
    /// Grid over `[origin, extents]` with `rows` divisions along y and
    /// `cols` divisions along x
    pub fn new(origin: Vect, extents: Vect, rows: i32, cols: i32) -> Self {
        let cell_dims = Vect::new(
            (extents.x - origin.x) / cols as f64,
            (extents.y - origin.y) / rows as f64,
        );
        Self {
            origin,
            extents,
            cell_dims,
            rows,
            cols,
            cells: BTreeMap::new(),
            clients: HashMap::new(),
        }
    }

    pub fn origin(&self) -> Vect {
        self.origin
    }

    pub fn extents(&self) -> Vect {
        self.extents
    }

    pub fn cell_dims(&self) -> Vect {
        self.cell_dims
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Cell containing `point`. Unclamped: points outside the declared
    /// extent get indices outside `[0, rows) x [0, cols)`.
    pub fn cell_index(&self, point: &Vect) -> CellIndex {
        let r = ((point.y - self.origin.y) / self.cell_dims.y).floor() as i32;
        let c = ((point.x - self.origin.x) / self.cell_dims.x).floor() as i32;
        (r, c)
    }

    /// Members of one cell, if any. Read-only introspection for the
    /// debug overlay and tests.
    pub fn cell_members(&self, cell: CellIndex) -> Option<&BTreeSet<ParticleId>> {
        self.cells.get(&cell)
    }

    /// All non-empty cells in key order
    pub fn occupied_cells(&self) -> impl Iterator<Item = (&CellIndex, &BTreeSet<ParticleId>)> {
        self.cells.iter()
    }

    fn range_for(&self, position: &Vect, radius: f64) -> CellRange {
        let min = Vect::new(position.x - radius, position.y - radius);
        let max = Vect::new(position.x + radius, position.y + radius);
        CellRange {
            min: self.cell_index(&min),
            max: self.cell_index(&max),
        }
    }

    fn insert_range(&mut self, id: ParticleId, range: CellRange) {
        for r in range.min.0..=range.max.0 {
            for c in range.min.1..=range.max.1 {
                self.cells.entry((r, c)).or_default().insert(id);
            }
        }
    }

    fn remove_range(&mut self, id: ParticleId, range: CellRange) {
        for r in range.min.0..=range.max.0 {
            for c in range.min.1..=range.max.1 {
                if let Some(members) = self.cells.get_mut(&(r, c)) {
                    members.remove(&id);
                    if members.is_empty() {
                        self.cells.remove(&(r, c));
                    }
                }
            }
        }
    }

    /// Add a new client covering `[position - radius, position + radius]`
    /// and record its cell range
    pub fn add_client(&mut self, id: ParticleId, position: &Vect, radius: f64) {
        let range = self.range_for(position, radius);
        self.insert_range(id, range);
        self.clients.insert(id, range);
    }

    /// Re-home a client after it moved or resized. A bounding box that
    /// still maps to the cached cell range leaves the grid untouched.
    pub fn update(&mut self, id: ParticleId, position: &Vect, radius: f64) {
        let range = self.range_for(position, radius);

        let Some(cached) = self.clients.get(&id).copied() else {
            // Unknown id: behave like a fresh insertion
            self.insert_range(id, range);
            self.clients.insert(id, range);
            return;
        };
        if cached == range {
            return;
        }

        self.remove_range(id, cached);
        self.insert_range(id, range);
        self.clients.insert(id, range);
    }

    /// Erase the client from every cell in its cached range. The
    /// cached range itself is kept so a later `update` can re-insert.
    pub fn remove(&mut self, id: ParticleId) {
        if let Some(range) = self.clients.get(&id).copied() {
            self.remove_range(id, range);
        }
    }

    /// Permanent departure: remove from all cells and drop the cached
    /// range. The id must never be reused by a future client.
    pub fn delete_client(&mut self, id: ParticleId) {
        self.remove(id);
        self.clients.remove(&id);
    }

    /// Union of every id present in any cell overlapping the query
    /// bounding box, deduplicated into `out`. False positives are
    /// expected; callers re-verify with the narrow phase.
    pub fn find_near(&self, position: &Vect, radius: f64, out: &mut BTreeSet<ParticleId>) {
        let range = self.range_for(position, radius);
        self.collect_range(range, out);
    }

    /// Same as [`find_near`](Self::find_near) but over the client's
    /// cached cell range. The client's own id is included.
    pub fn find_near_id(&self, id: ParticleId, out: &mut BTreeSet<ParticleId>) {
        if let Some(range) = self.clients.get(&id).copied() {
            self.collect_range(range, out);
        }
    }

    fn collect_range(&self, range: CellRange, out: &mut BTreeSet<ParticleId>) {
        for r in range.min.0..=range.max.0 {
            for c in range.min.1..=range.max.1 {
                if let Some(members) = self.cells.get(&(r, c)) {
                    out.extend(members.iter().copied());
                }
            }
        }
    }
}
