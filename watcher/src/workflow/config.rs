use anyhow::Context;
use carwatch_core::feed::client::DEFAULT_BASE_URL;
use carwatch_core::feed::City;
use carwatch_core::processing::{PollSettings, RetryPolicy};
use carwatch_core::Coordinate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// User-facing settings, from YAML and/or command-line flags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub city: String,
    pub delay_secs: u64,
    /// `"lat,lng"`; when absent the location is looked up.
    pub location: Option<String>,
    pub initial_radius_m: Option<u32>,
    pub retries: u32,
    pub retry_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub fail_fast: bool,
    pub feed_base_url: String,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            city: City::default().name().to_string(),
            delay_secs: 15,
            location: None,
            initial_radius_m: None,
            retries: 3,
            retry_delay_ms: 1000,
            request_timeout_secs: 30,
            fail_fast: false,
            feed_base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Validated configuration, ready to start the watcher.
#[derive(Clone, Debug, PartialEq)]
pub struct WatchPlan {
    pub city: City,
    pub location: Option<Coordinate>,
    pub pause: Duration,
    pub retry: RetryPolicy,
    pub initial_radius_m: Option<u32>,
    pub request_timeout: Duration,
    pub fail_fast: bool,
    pub feed_base_url: String,
}

impl WatchConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading watch config {}", path_ref.display()))?;
        let config: WatchConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing watch config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<WatchPlan> {
        let city: City = self.city.parse().with_context(|| {
            format!(
                "unsupported city, file a bug (supported: {})",
                City::supported_names()
            )
        })?;

        let location = self
            .location
            .as_deref()
            .map(str::parse::<Coordinate>)
            .transpose()
            .context("parsing --location")?;

        if self.initial_radius_m == Some(0) {
            anyhow::bail!("initial radius must be positive");
        }

        Ok(WatchPlan {
            city,
            location,
            pause: Duration::from_secs(self.delay_secs),
            retry: RetryPolicy::new(self.retries, Duration::from_millis(self.retry_delay_ms)),
            initial_radius_m: self.initial_radius_m,
            request_timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
            fail_fast: self.fail_fast,
            feed_base_url: self.feed_base_url.clone(),
        })
    }
}

impl WatchPlan {
    pub fn poll_settings(&self, observer: Coordinate) -> PollSettings {
        PollSettings {
            city: self.city,
            observer,
            pause: self.pause,
            retry: self.retry,
            initial_radius_m: self.initial_radius_m,
            fail_fast: self.fail_fast,
        }
    }
}
