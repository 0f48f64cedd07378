//! Core building blocks shared by every layer: randomness, easing,
//! errors and the console logger.

pub mod easing;
pub mod error;
pub mod logging;
pub mod random;

pub use error::{RendererError, RendererResult};
pub use random::Rng;
