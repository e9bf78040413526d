use crate::feed::record::parse_vehicles;
use crate::prelude::{Coordinate, Vehicle, VehicleFeed, WatchError, WatchResult};
use log::debug;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.reservauto.net";
const AVAILABLE_VEHICLES_PATH: &str = "/WCF/LSI/LSIBookingServiceV3.svc/GetAvailableVehicles";
const LANGUAGE_ID: u32 = 2;

/// HTTP client for the provider's "available vehicles" endpoint.
///
/// Performs exactly one request per call; retries are the caller's concern.
#[derive(Clone)]
pub struct VehicleFeedClient {
    client: reqwest::Client,
    base_url: String,
}

impl VehicleFeedClient {
    pub fn new(timeout: Duration) -> WatchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WatchError::FeedFetch(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn endpoint(&self, branch_id: u32) -> String {
        format!(
            "{}{}?BranchID={}&LanguageID={}",
            self.base_url, AVAILABLE_VEHICLES_PATH, branch_id, LANGUAGE_ID
        )
    }
}

impl VehicleFeed for VehicleFeedClient {
    async fn fetch_vehicles(
        &self,
        branch_id: u32,
        observer: Coordinate,
    ) -> WatchResult<Vec<Vehicle>> {
        let url = self.endpoint(branch_id);
        debug!("Url: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WatchError::FeedFetch(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(WatchError::FeedFetch(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| WatchError::FeedFetch(format!("failed to read response: {}", e)))?;

        parse_vehicles(&body, observer)
    }
}
