use crate::core::Rng;
use crate::domain::{GridDims, Palette, SparkConfig, Viewport};
use crate::spatial::Occupancy;

use super::perf_stats::PerfStats;
use super::SparkFieldCore;

pub(super) fn create_core(config: SparkConfig, palette: Palette, seed: u32) -> SparkFieldCore {
    let target = config.target_population;
    SparkFieldCore {
        config,
        palette,
        viewport: Viewport::default(),
        grid: GridDims::default(),
        sparks: Vec::with_capacity(target.saturating_add(1)),
        occupancy: Occupancy::new(GridDims::default()),
        rng: Rng::new(seed),
        last_timestamp: None,
        frame: 0,
        draws: Vec::with_capacity(target),
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}
