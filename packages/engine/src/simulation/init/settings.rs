use crate::core::RendererResult;
use crate::domain::SparkConfig;

use super::perf_stats::PerfStats;
use super::resize;
use super::SparkFieldCore;

pub(super) fn enable_perf_metrics(field: &mut SparkFieldCore, enabled: bool) {
    field.perf_enabled = enabled;
    if !enabled {
        field.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(field: &SparkFieldCore) -> PerfStats {
    field.perf_stats.clone()
}

pub(super) fn set_config(field: &mut SparkFieldCore, config: SparkConfig) -> RendererResult<()> {
    config.validate()?;
    let palette = config.palette()?;
    field.config = config;
    field.palette = palette;
    field.clear();
    // Cell size may have changed
    let viewport = field.viewport;
    resize::apply_viewport(field, viewport);
    log::info!(
        "spark config loaded: {} sparks on {}px cells, {} colors",
        field.config.target_population,
        field.config.cell_size,
        field.palette.len()
    );
    Ok(())
}
