use crate::core::Rng;
use crate::domain::{Cell, GridDims, Spark, MAX_POPULATION};
use crate::spatial::Occupancy;

use super::SparkFieldCore;

#[inline]
fn random_cell(rng: &mut Rng, grid: GridDims) -> Cell {
    Cell::new(rng.below(grid.cols), rng.below(grid.rows))
}

/// Rejection-sample a free cell. After `attempts` misses the last pick is
/// kept even though it is occupied; the flag reports that collision.
pub(super) fn pick_cell(
    rng: &mut Rng,
    grid: GridDims,
    occupancy: &Occupancy,
    attempts: u32,
) -> (Cell, bool) {
    let mut cell = random_cell(rng, grid);
    let mut tries = 1;
    while occupancy.is_occupied(cell) && tries < attempts {
        cell = random_cell(rng, grid);
        tries += 1;
    }
    (cell, occupancy.is_occupied(cell))
}

/// Spawn one random spark. `None` when there is nowhere to put it,
/// otherwise whether it had to share a cell.
pub(super) fn spawn(field: &mut SparkFieldCore) -> Option<bool> {
    if field.grid.is_empty() || field.palette.is_empty() {
        return None;
    }
    let (cell, collided) = pick_cell(
        &mut field.rng,
        field.grid,
        &field.occupancy,
        field.config.placement_attempts,
    );
    if collided {
        log::trace!(
            "no free cell after {} attempts, sharing ({}, {})",
            field.config.placement_attempts,
            cell.x,
            cell.y
        );
    }
    let color = field.palette.pick(&mut field.rng);
    let spark = Spark::random(cell, color, &field.config, &mut field.rng);
    field.sparks.push(spark);
    field.occupancy.occupy(cell);
    Some(collided)
}

/// Fill up to the target population. Returns `(spawned, collisions)`.
pub(super) fn top_up(field: &mut SparkFieldCore) -> (u32, u32) {
    let mut spawned = 0;
    let mut collisions = 0;
    while field.sparks.len() < field.config.target_population {
        match spawn(field) {
            Some(collided) => {
                spawned += 1;
                collisions += collided as u32;
            }
            None => break,
        }
    }
    (spawned, collisions)
}

pub(super) fn insert(field: &mut SparkFieldCore, spark: Spark) -> bool {
    if field.sparks.len() >= MAX_POPULATION
        || !spark.has_valid_timings()
        || !field.grid.contains(spark.cell)
        || field.palette.get(spark.color).is_none()
    {
        return false;
    }
    field.occupancy.occupy(spark.cell);
    field.sparks.push(spark);
    true
}
