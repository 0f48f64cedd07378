use wasm_bindgen::prelude::*;

/// Per-frame counters, refreshed by every step while perf metrics are on.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(super) frame_ms: f64,
    pub(super) step_ms: f64,
    pub(super) step_seconds: f32,
    pub(super) active_sparks: u32,
    pub(super) occupied_cells: u32,
    pub(super) drawn: u32,
    pub(super) spawned: u32,
    pub(super) expired: u32,
    pub(super) placement_collisions: u32,
    pub(super) sprite_cache_len: u32,
    pub(super) draw_failures: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    /// Whole frame: step plus drawing
    #[wasm_bindgen(getter)]
    pub fn frame_ms(&self) -> f64 { self.frame_ms }
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    /// Age step applied this frame (clamped)
    #[wasm_bindgen(getter)]
    pub fn step_seconds(&self) -> f32 { self.step_seconds }
    #[wasm_bindgen(getter)]
    pub fn active_sparks(&self) -> u32 { self.active_sparks }
    #[wasm_bindgen(getter)]
    pub fn occupied_cells(&self) -> u32 { self.occupied_cells }
    #[wasm_bindgen(getter)]
    pub fn drawn(&self) -> u32 { self.drawn }
    #[wasm_bindgen(getter)]
    pub fn spawned(&self) -> u32 { self.spawned }
    #[wasm_bindgen(getter)]
    pub fn expired(&self) -> u32 { self.expired }
    #[wasm_bindgen(getter)]
    pub fn placement_collisions(&self) -> u32 { self.placement_collisions }
    #[wasm_bindgen(getter)]
    pub fn sprite_cache_len(&self) -> u32 { self.sprite_cache_len }
    #[wasm_bindgen(getter)]
    pub fn draw_failures(&self) -> u32 { self.draw_failures }
}
