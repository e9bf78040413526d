use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::str::FromStr;

/// Latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Parses the `"lat,lng"` form accepted on the command line.
impl FromStr for Coordinate {
    type Err = WatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| WatchError::InvalidInput(format!("expected \"lat,lng\", got {:?}", s)))?;

        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| WatchError::InvalidInput(format!("invalid coordinate {:?}", s)))
        };

        Ok(Self::new(parse(lat)?, parse(lng)?))
    }
}

/// One available vehicle, with its distance from the observer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub brand: String,
    pub model: String,
    pub plate: String,
    pub color: String,
    pub location: Coordinate,
    pub distance_m: f64,
}

/// Opaque identifier handed back by the notification surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlertHandle(pub String);

impl fmt::Display for AlertHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Alert to display, with the actions offered as `(key, label)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRequest {
    pub title: String,
    pub body: String,
    pub actions: Vec<(String, String)>,
    pub replaces: Option<AlertHandle>,
}

/// What the surface reports once the alert is closed.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertResponse {
    pub handle: AlertHandle,
    pub action: Option<String>,
}

/// Common error type for the watcher core.
#[derive(thiserror::Error, Debug)]
pub enum WatchError {
    #[error("city {0} not yet supported")]
    UnsupportedCity(String),
    #[error("location resolution failed: {0}")]
    LocationResolution(String),
    #[error("vehicle feed fetch failed: {0}")]
    FeedFetch(String),
    #[error("notification failed: {0}")]
    Notification(String),
    #[error("could not open booking page: {0}")]
    Launch(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type WatchResult<T> = Result<T, WatchError>;

/// Source of available vehicles for a branch.
pub trait VehicleFeed {
    fn fetch_vehicles(
        &self,
        branch_id: u32,
        observer: Coordinate,
    ) -> impl Future<Output = WatchResult<Vec<Vehicle>>>;
}

/// Desktop surface able to show an alert with actions and report the choice.
pub trait NotificationSurface {
    fn present(&self, request: &AlertRequest) -> impl Future<Output = WatchResult<AlertResponse>>;
}

/// Opens the booking page when the user picks the `open` action.
pub trait BookingLauncher {
    fn open(&self, url: &str) -> impl Future<Output = WatchResult<()>>;
}
