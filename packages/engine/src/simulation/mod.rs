//! Spark field - the population of glowing cells and its per-frame update.
//!
//! `SparkFieldCore` owns the state machine (sparks, occupancy, clock) and
//! knows nothing about drawing; it produces a list of `SparkDraw`s each
//! frame. `AmbientRenderer` pairs it with a `Surface` and the glow cache.
//!
//! The host drives everything: call `step`/`render_frame` once per display
//! refresh with the refresh timestamp. Nothing here schedules itself.

use crate::core::{RendererResult, Rng};
use crate::domain::{Cell, GridDims, Palette, Spark, SparkConfig, Viewport};
use crate::render::{GlowKey, GlowSpec};
use crate::spatial::Occupancy;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "step/spawn.rs"]
mod spawn;
#[path = "step/resize.rs"]
mod resize;
#[path = "step/step.rs"]
mod step;
mod renderer;
mod facade;

pub use facade::SparkField;
pub use perf_stats::PerfStats;
pub use renderer::AmbientRenderer;

use perf_timer::PerfTimer;

/// One spark's draw call for the current frame, in logical units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SparkDraw {
    pub key: GlowKey,
    pub center_x: f32,
    pub center_y: f32,
    /// Drawn diameter
    pub size: f32,
    pub alpha: f32,
}

impl SparkDraw {
    /// Top-left corner of the drawn square.
    #[inline]
    pub fn origin(&self) -> (f32, f32) {
        (self.center_x - self.size / 2.0, self.center_y - self.size / 2.0)
    }
}

/// The spark population
pub struct SparkFieldCore {
    config: SparkConfig,
    palette: Palette,
    viewport: Viewport,
    grid: GridDims,

    // State
    sparks: Vec<Spark>,
    occupancy: Occupancy,
    rng: Rng,
    last_timestamp: Option<f64>,
    frame: u64,

    // Output of the last step
    draws: Vec<SparkDraw>,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl SparkFieldCore {
    /// Empty field with the default config; call `initialize` to populate.
    pub fn new(seed: u32) -> Self {
        init::create_core(SparkConfig::default(), Palette::default(), seed)
    }

    pub fn with_config(config: SparkConfig, seed: u32) -> RendererResult<Self> {
        config.validate()?;
        let palette = config.palette()?;
        Ok(init::create_core(config, palette, seed))
    }

    /// Set the viewport and fill the field up to the target population.
    /// Safe to call repeatedly.
    pub fn initialize(&mut self, viewport: Viewport) {
        resize::apply_viewport(self, viewport);
        let (spawned, _) = spawn::top_up(self);
        log::debug!(
            "spark field initialized: {}x{} cells, {} sparks ({} new)",
            self.grid.cols,
            self.grid.rows,
            self.sparks.len(),
            spawned
        );
    }

    /// Recompute the grid without respawning. Sparks left outside a smaller
    /// grid are dropped; the next step refills the population.
    pub fn resize(&mut self, viewport: Viewport) {
        resize::apply_viewport(self, viewport);
    }

    /// Advance the field to `now_ms` and rebuild the draw list.
    /// Returns the age step applied, in seconds.
    pub fn step(&mut self, now_ms: f64) -> f32 {
        step::step(self, now_ms)
    }

    /// Place one spark. Returns false when the grid has no cells.
    pub fn spawn(&mut self) -> bool {
        spawn::spawn(self).is_some()
    }

    /// Insert a spark with explicit timings. Rejected when its cell is
    /// outside the grid, its palette index is unknown, its timings are
    /// degenerate (zero fades, NaN) or the field is at `MAX_POPULATION`.
    pub fn insert_spark(&mut self, spark: Spark) -> bool {
        spawn::insert(self, spark)
    }

    /// Remove every spark.
    pub fn clear(&mut self) {
        self.sparks.clear();
        self.occupancy.clear();
        self.draws.clear();
    }

    pub fn config(&self) -> &SparkConfig {
        &self.config
    }

    /// Replace the config; the field is cleared and the grid recomputed.
    pub fn set_config(&mut self, config: SparkConfig) -> RendererResult<()> {
        settings::set_config(self, config)
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn grid(&self) -> GridDims {
        self.grid
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    pub fn active_count(&self) -> usize {
        self.sparks.len()
    }

    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.occupancy.is_occupied(cell)
    }

    /// Draw list produced by the last `step`
    pub fn draws(&self) -> &[SparkDraw] {
        &self.draws
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Enable or disable per-frame perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last frame's perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    /// Sprite parameters for a cache key.
    pub fn glow_spec(&self, key: GlowKey) -> GlowSpec {
        let color = self
            .palette
            .get(key.color)
            .or_else(|| self.palette.get(0))
            .unwrap_or_default();
        let side = self.config.cell_size as f32 * self.config.sprite_extent * key.scale();
        GlowSpec::new(color, side, self.viewport.pixel_density)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
