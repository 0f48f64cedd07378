use crate::domain::{GridDims, Viewport};

use super::SparkFieldCore;

/// Adopt a new viewport. Sparks whose cell no longer fits are dropped and
/// occupancy is re-keyed for the new column count.
pub(super) fn apply_viewport(field: &mut SparkFieldCore, viewport: Viewport) {
    let grid = GridDims::for_viewport(&viewport, field.config.cell_size);
    field.viewport = viewport;
    if grid == field.grid && field.occupancy.grid() == grid {
        return;
    }

    let before = field.sparks.len();
    field.sparks.retain(|spark| grid.contains(spark.cell));
    let dropped = before - field.sparks.len();

    field.grid = grid;
    field
        .occupancy
        .rebuild(grid, field.sparks.iter().map(|spark| spark.cell));

    log::debug!(
        "grid resized to {}x{} cells ({}x{} viewport), dropped {} sparks",
        grid.cols,
        grid.rows,
        viewport.width,
        viewport.height,
        dropped
    );
}
