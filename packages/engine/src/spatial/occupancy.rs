//! Occupancy tracking - which grid cells currently hold a live spark.
//!
//! Stored as a count per cell rather than a flag: a spark placed on an
//! occupied cell after placement gives up bumps the count to 2, and the
//! cell stays occupied until both sparks are gone.
//!
//! Counts are `u16`, exact only while no cell holds more than 65535
//! sparks. The field never holds more than
//! [`MAX_POPULATION`](crate::domain::MAX_POPULATION) (4096) sparks, which
//! keeps that out of reach; a count saturated at `u16::MAX` would release
//! early.

use crate::domain::{Cell, GridDims};

pub struct Occupancy {
    grid: GridDims,
    counts: Vec<u16>,
    occupied: usize,
}

impl Occupancy {
    pub fn new(grid: GridDims) -> Self {
        Self {
            grid,
            counts: vec![0; grid.cell_count()],
            occupied: 0,
        }
    }

    pub fn grid(&self) -> GridDims {
        self.grid
    }

    /// Number of distinct cells with at least one spark
    pub fn occupied_cells(&self) -> usize {
        self.occupied
    }

    #[inline]
    pub fn count(&self, cell: Cell) -> u16 {
        if !self.grid.contains(cell) {
            return 0;
        }
        self.counts[self.grid.index(cell)]
    }

    #[inline]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.count(cell) > 0
    }

    /// Out-of-grid cells are ignored.
    #[inline]
    pub fn occupy(&mut self, cell: Cell) {
        if !self.grid.contains(cell) {
            return;
        }
        let idx = self.grid.index(cell);
        if self.counts[idx] == 0 {
            self.occupied += 1;
        }
        self.counts[idx] = self.counts[idx].saturating_add(1);
    }

    #[inline]
    pub fn release(&mut self, cell: Cell) {
        if !self.grid.contains(cell) {
            return;
        }
        let idx = self.grid.index(cell);
        if self.counts[idx] > 0 {
            self.counts[idx] -= 1;
            if self.counts[idx] == 0 {
                self.occupied -= 1;
            }
        }
    }

    pub fn clear(&mut self) {
        self.counts.fill(0);
        self.occupied = 0;
    }

    /// Re-key for a new grid. Cell indices depend on `cols`, so counts are
    /// recomputed from the sparks that survived the resize.
    pub fn rebuild<I>(&mut self, grid: GridDims, cells: I)
    where
        I: IntoIterator<Item = Cell>,
    {
        self.grid = grid;
        self.counts.clear();
        self.counts.resize(grid.cell_count(), 0);
        self.occupied = 0;
        for cell in cells {
            self.occupy(cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MAX_POPULATION;

    #[test]
    fn occupy_and_release() {
        let mut occ = Occupancy::new(GridDims::new(4, 3));
        let cell = Cell::new(2, 1);
        assert!(!occ.is_occupied(cell));
        occ.occupy(cell);
        assert!(occ.is_occupied(cell));
        assert_eq!(occ.occupied_cells(), 1);
        occ.release(cell);
        assert!(!occ.is_occupied(cell));
        assert_eq!(occ.occupied_cells(), 0);
    }

    #[test]
    fn shared_cell_stays_occupied_until_last_release() {
        let mut occ = Occupancy::new(GridDims::new(2, 2));
        let cell = Cell::new(1, 1);
        occ.occupy(cell);
        occ.occupy(cell);
        assert_eq!(occ.count(cell), 2);
        assert_eq!(occ.occupied_cells(), 1);
        occ.release(cell);
        assert!(occ.is_occupied(cell));
        occ.release(cell);
        assert!(!occ.is_occupied(cell));
        // Extra releases are harmless
        occ.release(cell);
        assert_eq!(occ.count(cell), 0);
    }

    #[test]
    fn full_population_on_one_cell_counts_exactly() {
        let mut occ = Occupancy::new(GridDims::new(1, 1));
        let cell = Cell::new(0, 0);
        for _ in 0..MAX_POPULATION {
            occ.occupy(cell);
        }
        assert_eq!(occ.count(cell) as usize, MAX_POPULATION);
        for _ in 1..MAX_POPULATION {
            occ.release(cell);
        }
        assert!(occ.is_occupied(cell));
        occ.release(cell);
        assert!(!occ.is_occupied(cell));
        assert_eq!(occ.occupied_cells(), 0);
    }

    #[test]
    fn out_of_grid_cells_are_ignored() {
        let mut occ = Occupancy::new(GridDims::new(2, 2));
        occ.occupy(Cell::new(5, 0));
        assert_eq!(occ.occupied_cells(), 0);
        assert!(!occ.is_occupied(Cell::new(5, 0)));
    }

    #[test]
    fn rebuild_rekeys_by_new_width() {
        let mut occ = Occupancy::new(GridDims::new(8, 8));
        occ.occupy(Cell::new(1, 1));
        occ.rebuild(GridDims::new(3, 3), [Cell::new(1, 1), Cell::new(2, 2)]);
        assert!(occ.is_occupied(Cell::new(1, 1)));
        assert!(occ.is_occupied(Cell::new(2, 2)));
        assert!(!occ.is_occupied(Cell::new(2, 1)));
        assert_eq!(occ.occupied_cells(), 2);
    }
}
