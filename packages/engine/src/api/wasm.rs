use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::domain::SparkConfig;
use crate::render::CanvasSurface;
use crate::simulation::{AmbientRenderer, PerfStats};

/// Seed for the field's xorshift generator; never zero.
pub(crate) fn random_seed() -> u32 {
    ((js_sys::Math::random() * u32::MAX as f64) as u32) | 1
}

/// Canvas-backed background. When the canvas has no 2D context every
/// method is a no-op and `is_available` reports false.
#[wasm_bindgen]
pub struct AmbientBackground {
    renderer: Option<AmbientRenderer<CanvasSurface>>,
}

#[wasm_bindgen]
impl AmbientBackground {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        let renderer = match CanvasSurface::from_canvas(canvas) {
            Ok(surface) => Some(AmbientRenderer::new(surface, random_seed())),
            Err(err) => {
                log::warn!("ambient background disabled: {err}");
                None
            }
        };
        Self { renderer }
    }

    #[wasm_bindgen(getter)]
    pub fn is_available(&self) -> bool {
        self.renderer.is_some()
    }

    pub fn initialize(&mut self, width: f64, height: f64, pixel_density: f64) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.initialize(width, height, pixel_density);
        }
    }

    pub fn on_resize(&mut self, width: f64, height: f64, pixel_density: f64) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.on_resize(width, height, pixel_density);
        }
    }

    pub fn render_frame(&mut self, now_ms: f64) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.render_frame(now_ms);
        }
    }

    pub fn housekeep(&mut self) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.housekeep();
        }
    }

    pub fn dispose(&mut self) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.dispose();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn active_sparks(&self) -> usize {
        self.renderer
            .as_ref()
            .map_or(0, |renderer| renderer.core().active_count())
    }

    #[wasm_bindgen(getter)]
    pub fn housekeeping_interval_ms(&self) -> u32 {
        self.renderer.as_ref().map_or(
            SparkConfig::default().housekeeping_interval_ms,
            |renderer| renderer.core().config().housekeeping_interval_ms,
        )
    }

    pub fn load_config_json(&mut self, json: String) -> Result<(), JsValue> {
        let config = SparkConfig::from_json(&json)?;
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.load_config(config)?;
        }
        Ok(())
    }

    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.enable_perf_metrics(enabled);
        }
    }

    pub fn get_perf_stats(&self) -> PerfStats {
        self.renderer
            .as_ref()
            .map(|renderer| renderer.get_perf_stats())
            .unwrap_or_default()
    }
}
