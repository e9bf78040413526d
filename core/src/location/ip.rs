use super::LocationProvider;
use crate::prelude::{Coordinate, WatchError, WatchResult};
use log::debug;
use serde::Deserialize;
use std::time::Duration;

pub const IPIFY_URL: &str = "https://api.ipify.org?format=json";
pub const IP_API_URL: &str = "http://ip-api.com/json";

#[derive(Debug, Deserialize)]
struct PublicIp {
    ip: String,
}

#[derive(Debug, Deserialize)]
struct IpGeolocation {
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Coarse position from the public IP address.
#[derive(Debug, Clone)]
pub struct IpLocation {
    client: reqwest::Client,
    ip_url: String,
    geo_url: String,
}

impl IpLocation {
    pub fn new(timeout: Duration) -> WatchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                WatchError::LocationResolution(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            ip_url: IPIFY_URL.to_string(),
            geo_url: IP_API_URL.to_string(),
        })
    }

    pub fn with_endpoints(mut self, ip_url: impl Into<String>, geo_url: impl Into<String>) -> Self {
        self.ip_url = ip_url.into();
        self.geo_url = geo_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> WatchResult<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| WatchError::LocationResolution(format!("{}: {}", url, e)))?;

        response
            .json::<T>()
            .await
            .map_err(|e| WatchError::LocationResolution(format!("{}: {}", url, e)))
    }
}

impl LocationProvider for IpLocation {
    async fn resolve(&self) -> WatchResult<Coordinate> {
        let PublicIp { ip } = self.get_json(&self.ip_url).await?;
        debug!("Public IP {}", ip);

        let geo: IpGeolocation = self.get_json(&format!("{}/{}", self.geo_url, ip)).await?;
        match (geo.lat, geo.lon) {
            (Some(lat), Some(lon)) => Ok(Coordinate::new(lat, lon)),
            _ => Err(WatchError::LocationResolution(
                "could not get location from IP".into(),
            )),
        }
    }
}
