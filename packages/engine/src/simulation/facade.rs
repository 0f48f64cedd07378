use wasm_bindgen::prelude::*;

use crate::domain::SparkConfig;
use crate::render::PixelSurface;

use super::perf_stats::PerfStats;
use super::AmbientRenderer;

/// Pixel-buffer spark field for hosts that blit `ImageData` themselves
/// (workers, OffscreenCanvas, tests).
///
/// JS reads the frame through `pixels_ptr`/`pixels_len` as straight-alpha
/// RGBA8, `pixel_width × pixel_height`.
#[wasm_bindgen]
pub struct SparkField {
    renderer: AmbientRenderer<PixelSurface>,
}

#[wasm_bindgen]
impl SparkField {
    /// Create and initialize a field for the given viewport
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, pixel_density: f64, seed: u32) -> Self {
        let mut renderer = AmbientRenderer::new(PixelSurface::new(), seed);
        renderer.initialize(width, height, pixel_density);
        Self { renderer }
    }

    pub fn initialize(&mut self, width: f64, height: f64, pixel_density: f64) {
        self.renderer.initialize(width, height, pixel_density);
    }

    pub fn on_resize(&mut self, width: f64, height: f64, pixel_density: f64) {
        self.renderer.on_resize(width, height, pixel_density);
    }

    /// Advance and redraw; `now_ms` is the requestAnimationFrame timestamp
    pub fn render_frame(&mut self, now_ms: f64) {
        self.renderer.render_frame(now_ms);
    }

    pub fn housekeep(&mut self) {
        self.renderer.housekeep();
    }

    pub fn dispose(&mut self) {
        self.renderer.dispose();
    }

    #[wasm_bindgen(getter)]
    pub fn active_sparks(&self) -> usize {
        self.renderer.core().active_count()
    }

    #[wasm_bindgen(getter)]
    pub fn cols(&self) -> u32 {
        self.renderer.core().grid().cols
    }

    #[wasm_bindgen(getter)]
    pub fn rows(&self) -> u32 {
        self.renderer.core().grid().rows
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 {
        self.renderer.core().frame()
    }

    #[wasm_bindgen(getter)]
    pub fn housekeeping_interval_ms(&self) -> u32 {
        self.renderer.core().config().housekeeping_interval_ms
    }

    pub fn load_config_json(&mut self, json: String) -> Result<(), JsValue> {
        let config = SparkConfig::from_json(&json)?;
        self.renderer.load_config(config)?;
        Ok(())
    }

    pub fn config_json(&self) -> Result<String, JsValue> {
        Ok(self.renderer.core().config().to_json()?)
    }

    /// Enable or disable per-frame perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.renderer.enable_perf_metrics(enabled);
    }

    /// Last frame's perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.renderer.get_perf_stats()
    }

    /// Convert the frame to straight-alpha RGBA8 and return its address
    pub fn pixels_ptr(&mut self) -> *const u8 {
        self.renderer.surface_mut().export_rgba();
        self.renderer.surface().rgba_ptr()
    }

    pub fn pixels_len(&self) -> usize {
        self.renderer.surface().rgba_len()
    }

    #[wasm_bindgen(getter)]
    pub fn pixel_width(&self) -> u32 {
        self.renderer.surface().width()
    }

    #[wasm_bindgen(getter)]
    pub fn pixel_height(&self) -> u32 {
        self.renderer.surface().height()
    }
}

impl SparkField {
    pub fn renderer(&self) -> &AmbientRenderer<PixelSurface> {
        &self.renderer
    }
}
