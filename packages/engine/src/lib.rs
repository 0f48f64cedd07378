//! Ambient Sparks - glowing spark background for the landing page, in WASM
//!
//! A full-viewport field of softly glowing grid cells. Each spark fades in,
//! holds, fades out and is replaced, keeping a constant population.
//!
//! Architecture:
//! - core/        - RNG, easing, errors, logging
//! - domain/      - Viewport/grid, palette, spark, config
//! - spatial/     - Cell occupancy
//! - render/      - Surface trait, glow sprite cache, pixel + canvas surfaces
//! - simulation/  - Spark field state machine and renderer
//! - api/         - Browser exports

pub mod core;
pub mod domain;
pub mod spatial;
pub mod render;
pub mod simulation;
pub mod api;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the module: panic hook and console logging
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    crate::core::logging::install(log::LevelFilter::Info);
    log::info!("✨ Ambient sparks renderer initialized (v{})", env!("CARGO_PKG_VERSION"));
}

/// Get renderer version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use api::driver::{mount_background, BackgroundHandle};
pub use api::wasm::AmbientBackground;
pub use crate::core::{RendererError, RendererResult};
pub use domain::{Cell, GridDims, Spark, SparkConfig, Viewport};
pub use render::{PixelSurface, Surface};
pub use simulation::{AmbientRenderer, PerfStats, SparkDraw, SparkField, SparkFieldCore};
