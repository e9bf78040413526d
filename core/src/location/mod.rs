//! Ways of finding the observer's position.
//!
//! A fixed coordinate short-circuits everything else; otherwise the geoclue
//! probe is tried before falling back to IP geolocation.

pub mod geoclue;
pub mod ip;

use crate::prelude::{Coordinate, WatchError, WatchResult};
use log::warn;
use std::future::Future;

pub use geoclue::GeoclueLocation;
pub use ip::IpLocation;

pub trait LocationProvider {
    fn resolve(&self) -> impl Future<Output = WatchResult<Coordinate>>;
}

/// Coordinate given up front, typically from `--location`.
#[derive(Debug, Clone, Copy)]
pub struct StaticLocation(pub Coordinate);

impl LocationProvider for StaticLocation {
    async fn resolve(&self) -> WatchResult<Coordinate> {
        Ok(self.0)
    }
}

/// Tries `primary`, then `secondary` if the first one fails.
#[derive(Debug, Clone)]
pub struct FallbackLocation<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> FallbackLocation<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl<P, S> LocationProvider for FallbackLocation<P, S>
where
    P: LocationProvider,
    S: LocationProvider,
{
    async fn resolve(&self) -> WatchResult<Coordinate> {
        match self.primary.resolve().await {
            Ok(coordinate) => Ok(coordinate),
            Err(primary_err) => {
                warn!("{}; falling back", primary_err);
                self.secondary.resolve().await.map_err(|err| {
                    WatchError::LocationResolution(format!(
                        "{}. Try passing the location manually with --location",
                        err
                    ))
                })
            }
        }
    }
}
