//! Core of the car-sharing availability watcher.
//!
//! Polls a branch's available vehicles, keeps the ones inside a shrinking
//! search radius, and drives a desktop alert for the nearest one.

pub mod feed;
pub mod location;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use prelude::{Coordinate, Vehicle, WatchError, WatchResult};
