pub mod geo;
pub mod ladder;

pub use geo::distance;
pub use ladder::{human_distance, RadiusLadder};
