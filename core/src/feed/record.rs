use crate::math::geo;
use crate::prelude::{Coordinate, Vehicle, WatchError, WatchResult};
use serde::{Deserialize, Serialize};

/// Top-level JSON envelope returned by the availability endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEnvelope {
    #[serde(rename = "d")]
    pub payload: FeedPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPayload {
    #[serde(rename = "Vehicles")]
    pub vehicles: Vec<VehicleRecord>,
}

/// Raw vehicle entry as the provider names it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleRecord {
    #[serde(rename = "CarBrand")]
    pub brand: String,
    #[serde(rename = "CarModel")]
    pub model: String,
    #[serde(rename = "CarPlate")]
    pub plate: String,
    #[serde(rename = "CarColor")]
    pub color: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

impl VehicleRecord {
    pub fn into_vehicle(self, observer: Coordinate) -> WatchResult<Vehicle> {
        let location = Coordinate::new(self.latitude, self.longitude);
        if !location.is_finite() {
            return Err(WatchError::FeedFetch(format!(
                "vehicle {} has non-finite coordinates",
                self.plate
            )));
        }

        Ok(Vehicle {
            distance_m: geo::distance(observer, location),
            brand: self.brand,
            model: self.model,
            plate: self.plate,
            color: self.color,
            location,
        })
    }
}

/// Decodes a feed body into vehicles measured from `observer`.
///
/// Any malformed record fails the whole batch.
pub fn parse_vehicles(body: &[u8], observer: Coordinate) -> WatchResult<Vec<Vehicle>> {
    let envelope: FeedEnvelope = serde_json::from_slice(body)
        .map_err(|e| WatchError::FeedFetch(format!("malformed feed payload: {}", e)))?;

    envelope
        .payload
        .vehicles
        .into_iter()
        .map(|record| record.into_vehicle(observer))
        .collect()
}
