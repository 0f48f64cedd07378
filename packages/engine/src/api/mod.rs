//! Browser-facing exports.

pub mod driver;
pub mod wasm;
