pub mod occupancy;

pub use occupancy::Occupancy;
