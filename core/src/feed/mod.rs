pub mod branch;
pub mod client;
pub mod record;

pub use branch::City;
pub use client::VehicleFeedClient;
pub use record::{parse_vehicles, VehicleRecord};
