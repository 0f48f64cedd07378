pub mod config;
pub mod palette;
pub mod spark;
pub mod viewport;

pub use config::{Range, SparkConfig, MAX_PLACEMENT_ATTEMPTS, MAX_POPULATION};
pub use palette::{Palette, Rgb, DEFAULT_PALETTE};
pub use spark::Spark;
pub use viewport::{Cell, GridDims, Viewport};
