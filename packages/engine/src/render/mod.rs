//! Drawing side of the renderer: the host surface abstraction, the glow
//! sprite cache and the two surface implementations.

pub mod canvas_surface;
pub mod glow_cache;
pub mod pixel_surface;
pub mod surface;

pub use canvas_surface::CanvasSurface;
pub use glow_cache::{GlowCache, GlowKey};
pub use pixel_surface::{PixelSprite, PixelSurface};
pub use surface::{GlowSpec, GlowStop, Surface, GLOW_INNER_RADIUS, GLOW_STOPS};
