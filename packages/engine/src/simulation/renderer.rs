use crate::core::RendererResult;
use crate::domain::{SparkConfig, Viewport};
use crate::render::{GlowCache, Surface};

use super::{PerfStats, PerfTimer, SparkFieldCore};

/// Spark field bound to a drawing surface.
///
/// Lifecycle: `initialize` → (`render_frame` | `on_resize` | `housekeep`)* →
/// `dispose`. A disposed renderer ignores frames until initialized again.
pub struct AmbientRenderer<S: Surface> {
    core: SparkFieldCore,
    surface: S,
    glow_cache: GlowCache<S::Sprite>,
    disposed: bool,
}

impl<S: Surface> AmbientRenderer<S> {
    pub fn new(surface: S, seed: u32) -> Self {
        Self {
            core: SparkFieldCore::new(seed),
            surface,
            glow_cache: GlowCache::new(),
            disposed: false,
        }
    }

    pub fn with_config(surface: S, config: SparkConfig, seed: u32) -> RendererResult<Self> {
        Ok(Self {
            core: SparkFieldCore::with_config(config, seed)?,
            surface,
            glow_cache: GlowCache::new(),
            disposed: false,
        })
    }

    /// Size the surface, set up the grid and spawn the initial population.
    pub fn initialize(&mut self, width: f64, height: f64, pixel_density: f64) {
        let viewport = Viewport::new(width, height, pixel_density);
        self.disposed = false;
        self.configure_surface(&viewport);
        self.core.initialize(viewport);
    }

    /// Resize the surface and grid; live sparks are kept where they still fit.
    pub fn on_resize(&mut self, width: f64, height: f64, pixel_density: f64) {
        let viewport = Viewport::new(width, height, pixel_density);
        self.configure_surface(&viewport);
        self.core.resize(viewport);
    }

    fn configure_surface(&mut self, viewport: &Viewport) {
        if let Err(err) = self.surface.configure(viewport) {
            log::warn!("surface configure failed: {err}");
        }
    }

    /// Advance to `now_ms` and redraw the whole field.
    pub fn render_frame(&mut self, now_ms: f64) {
        if self.disposed {
            return;
        }
        let timer = self.core.perf_enabled.then(PerfTimer::start);

        self.core.step(now_ms);

        let Self {
            core,
            surface,
            glow_cache,
            ..
        } = self;
        let viewport = core.viewport();
        surface.clear(viewport.width, viewport.height);

        let mut failures = 0u32;
        for draw in core.draws() {
            let sprite = match glow_cache.get_or_create(
                draw.key,
                viewport.pixel_density,
                surface,
                || core.glow_spec(draw.key),
            ) {
                Ok(sprite) => sprite,
                Err(err) => {
                    failures += 1;
                    log::warn!("glow sprite unavailable: {err}");
                    continue;
                }
            };
            let (x, y) = draw.origin();
            if let Err(err) = surface.draw_glow(
                sprite,
                x as f64,
                y as f64,
                draw.size as f64,
                draw.alpha as f64,
            ) {
                failures += 1;
                log::warn!("spark draw failed: {err}");
            }
        }

        if let Some(timer) = timer {
            let stats = &mut self.core.perf_stats;
            stats.frame_ms = timer.elapsed_ms();
            stats.sprite_cache_len = self.glow_cache.len() as u32;
            stats.draw_failures = failures;
        }
    }

    /// Clear the whole surface outside the normal frame clear.
    pub fn housekeep(&mut self) {
        if self.disposed {
            return;
        }
        let viewport = self.core.viewport();
        self.surface.clear(viewport.width, viewport.height);
    }

    /// Drop cached sprites and stop drawing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.glow_cache.clear();
        self.disposed = true;
        log::debug!("ambient renderer disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Swap the config; clears the field, the sprite cache and refills on the
    /// next frame.
    pub fn load_config(&mut self, config: SparkConfig) -> RendererResult<()> {
        self.core.set_config(config)?;
        self.glow_cache.clear();
        Ok(())
    }

    pub fn core(&self) -> &SparkFieldCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut SparkFieldCore {
        &mut self.core
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn glow_cache_len(&self) -> usize {
        self.glow_cache.len()
    }

    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }
}
