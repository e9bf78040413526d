use crate::feed::City;
use crate::math::ladder::{human_distance, RadiusLadder};
use crate::prelude::{
    BookingLauncher, Coordinate, NotificationSurface, VehicleFeed, WatchError, WatchResult,
};
use crate::processing::notifier::{AlertOutcome, NotificationController};
use crate::processing::retry::RetryPolicy;
use crate::processing::selection::select_within;
use crate::telemetry::{LogManager, Metrics, MetricsRecorder};
use log::{error, info, warn};
use std::time::Duration;

/// Runtime settings resolved at startup.
#[derive(Debug, Clone)]
pub struct PollSettings {
    pub city: City,
    pub observer: Coordinate,
    pub pause: Duration,
    pub retry: RetryPolicy,
    /// Starting radius in meters; `None` starts at the widest rung.
    pub initial_radius_m: Option<u32>,
    /// Propagate exhausted fetch retries instead of waiting for the next poll.
    pub fail_fast: bool,
}

impl PollSettings {
    pub fn new(city: City, observer: Coordinate) -> Self {
        Self {
            city,
            observer,
            pause: Duration::from_secs(15),
            retry: RetryPolicy::default(),
            initial_radius_m: None,
            fail_fast: false,
        }
    }
}

/// Summary of a single poll.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationReport {
    pub fetched: usize,
    pub within: usize,
    pub radius_m: u32,
    pub fetch_failed: bool,
    pub alert: Option<AlertOutcome>,
}

impl IterationReport {
    pub fn should_stop(&self) -> bool {
        self.alert == Some(AlertOutcome::Stop)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Stopped,
}

/// Fetch, filter, alert, sleep; owns every piece of state that survives a poll.
pub struct PollLoop<F, S, L> {
    settings: PollSettings,
    ladder: RadiusLadder,
    radius_m: u32,
    controller: NotificationController,
    feed: F,
    surface: S,
    launcher: L,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl<F, S, L> PollLoop<F, S, L>
where
    F: VehicleFeed,
    S: NotificationSurface,
    L: BookingLauncher,
{
    pub fn new(
        settings: PollSettings,
        ladder: RadiusLadder,
        feed: F,
        surface: S,
        launcher: L,
    ) -> WatchResult<Self> {
        let radius_m = settings.initial_radius_m.unwrap_or_else(|| ladder.widest());
        if radius_m == 0 {
            return Err(WatchError::InvalidInput(
                "initial radius must be positive".into(),
            ));
        }

        Ok(Self {
            settings,
            ladder,
            radius_m,
            controller: NotificationController::new(),
            feed,
            surface,
            launcher,
            logger: LogManager::new(),
            metrics: MetricsRecorder::new(),
        })
    }

    pub fn radius_m(&self) -> u32 {
        self.radius_m
    }

    pub fn controller(&self) -> &NotificationController {
        &self.controller
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics.snapshot()
    }

    /// Polls until the user picks `stop`.
    pub async fn run(&mut self) -> WatchResult<LoopExit> {
        info!(
            "Watching branch {} ({}) from {} within {}",
            self.settings.city.branch_id(),
            self.settings.city,
            self.settings.observer,
            human_distance(self.radius_m)
        );

        loop {
            let report = self.run_iteration().await?;
            if report.should_stop() {
                let metrics = self.metrics();
                info!(
                    "Stopped after {} polls ({} failed fetches, {} alerts)",
                    metrics.polls, metrics.fetch_failures, metrics.alerts
                );
                return Ok(LoopExit::Stopped);
            }
            tokio::time::sleep(self.settings.pause).await;
        }
    }

    /// One poll without the trailing sleep.
    pub async fn run_iteration(&mut self) -> WatchResult<IterationReport> {
        self.metrics.record_poll();

        let feed = &self.feed;
        let branch_id = self.settings.city.branch_id();
        let observer = self.settings.observer;
        let fetched = self
            .settings
            .retry
            .run(move || feed.fetch_vehicles(branch_id, observer))
            .await;

        let vehicles = match fetched {
            Ok(vehicles) => vehicles,
            Err(err) => {
                self.metrics.record_fetch_failure();
                if self.settings.fail_fast {
                    return Err(err);
                }
                error!(
                    "Giving up on this poll after {} attempts: {}",
                    self.settings.retry.max_attempts(),
                    err
                );
                return Ok(IterationReport {
                    fetched: 0,
                    within: 0,
                    radius_m: self.radius_m,
                    fetch_failed: true,
                    alert: None,
                });
            }
        };

        let fetched = vehicles.len();
        let within = select_within(vehicles, self.radius_m);
        self.logger
            .record_poll(fetched, within.len(), self.radius_m, self.settings.pause);

        let mut report = IterationReport {
            fetched,
            within: within.len(),
            radius_m: self.radius_m,
            fetch_failed: false,
            alert: None,
        };

        // A stale alert is left on screen when nothing qualifies.
        let Some(nearest) = within.first() else {
            return Ok(report);
        };

        let next_radius = self.ladder.next_smaller(nearest.distance_m);
        let outcome = match self
            .controller
            .alert(&self.surface, nearest, next_radius)
            .await
        {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("{}", err);
                return Ok(report);
            }
        };
        self.metrics.record_alert();

        match outcome {
            AlertOutcome::Open => {
                let url = self.settings.city.booking_url();
                info!("Opening {}", url);
                if let Err(err) = self.launcher.open(&url).await {
                    warn!("{}", err);
                }
            }
            AlertOutcome::Reduce(radius) => {
                self.radius_m = self.radius_m.min(radius);
                info!("Search radius reduced to {}", human_distance(self.radius_m));
            }
            AlertOutcome::Stop | AlertOutcome::Dismissed => {}
        }

        report.alert = Some(outcome);
        Ok(report)
    }
}
