use crate::desktop::{NotifySendSurface, XdgOpenLauncher};
use crate::workflow::config::WatchPlan;
use anyhow::Context;
use carwatch_core::feed::VehicleFeedClient;
use carwatch_core::location::{
    FallbackLocation, GeoclueLocation, IpLocation, LocationProvider, StaticLocation,
};
use carwatch_core::math::RadiusLadder;
use carwatch_core::processing::{LoopExit, PollLoop};
use carwatch_core::prelude::{BookingLauncher, NotificationSurface, VehicleFeed};
use carwatch_core::{Coordinate, WatchResult};
use log::info;
use std::future::Future;
use std::io;
use tokio::signal;

/// Why the watcher returned control to `main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    Stopped,
    Interrupted,
}

/// A fixed location skips the lookup chain and its retries.
pub async fn resolve_observer(plan: &WatchPlan) -> WatchResult<Coordinate> {
    if let Some(coordinate) = plan.location {
        return StaticLocation(coordinate).resolve().await;
    }

    let chain = FallbackLocation::new(
        GeoclueLocation::new(),
        IpLocation::new(plan.request_timeout)?,
    );
    plan.retry.run(|| chain.resolve()).await
}

pub async fn run(plan: WatchPlan) -> anyhow::Result<Shutdown> {
    let observer = resolve_observer(&plan)
        .await
        .context("resolving current location")?;
    info!("Current location: {}", observer);

    let feed = VehicleFeedClient::new(plan.request_timeout)?.with_base_url(&plan.feed_base_url);
    let mut poll = PollLoop::new(
        plan.poll_settings(observer),
        RadiusLadder::default(),
        feed,
        NotifySendSurface::new(),
        XdgOpenLauncher::new(),
    )?;

    watch_until(&mut poll, signal::ctrl_c()).await
}

/// Runs the loop until it stops on its own or `shutdown` resolves.
pub async fn watch_until<F, S, L, Sig>(
    poll: &mut PollLoop<F, S, L>,
    shutdown: Sig,
) -> anyhow::Result<Shutdown>
where
    F: VehicleFeed,
    S: NotificationSurface,
    L: BookingLauncher,
    Sig: Future<Output = io::Result<()>>,
{
    let outcome = {
        tokio::select! {
            exit = poll.run() => match exit.context("polling for vehicles")? {
                LoopExit::Stopped => Shutdown::Stopped,
            },
            signal = shutdown => {
                signal.context("awaiting Ctrl+C to exit")?;
                Shutdown::Interrupted
            }
        }
    };

    if outcome == Shutdown::Interrupted {
        let metrics = poll.metrics();
        info!(
            "Interrupted after {} polls ({} failed fetches, {} alerts)",
            metrics.polls, metrics.fetch_failures, metrics.alerts
        );
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::WatchConfig;
    use carwatch_core::prelude::{AlertRequest, AlertResponse, Vehicle, WatchError};
    use carwatch_core::processing::PollSettings;
    use std::time::Duration;

    struct EmptyFeed;

    impl VehicleFeed for EmptyFeed {
        async fn fetch_vehicles(
            &self,
            _branch_id: u32,
            _observer: Coordinate,
        ) -> WatchResult<Vec<Vehicle>> {
            Ok(Vec::new())
        }
    }

    struct NoSurface;

    impl NotificationSurface for NoSurface {
        async fn present(&self, _request: &AlertRequest) -> WatchResult<AlertResponse> {
            Err(WatchError::Notification("no desktop".into()))
        }
    }

    struct NoLauncher;

    impl BookingLauncher for NoLauncher {
        async fn open(&self, _url: &str) -> WatchResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn static_location_is_used_verbatim() {
        let config = WatchConfig {
            location: Some("43.7,-79.4".into()),
            ..Default::default()
        };
        let plan = config.validate().unwrap();

        let observer = resolve_observer(&plan).await.unwrap();
        assert_eq!(observer, Coordinate::new(43.7, -79.4));
    }

    #[tokio::test]
    async fn interrupt_ends_polling_and_keeps_metrics_readable() {
        let plan = WatchConfig::default().validate().unwrap();
        let settings = PollSettings {
            pause: Duration::from_millis(5),
            ..plan.poll_settings(Coordinate::new(43.7, -79.4))
        };
        let mut poll = PollLoop::new(
            settings,
            RadiusLadder::default(),
            EmptyFeed,
            NoSurface,
            NoLauncher,
        )
        .unwrap();

        let shutdown = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok::<(), io::Error>(())
        };
        let outcome = watch_until(&mut poll, shutdown).await.unwrap();

        assert_eq!(outcome, Shutdown::Interrupted);
        assert!(poll.metrics().polls >= 1);
        assert_eq!(poll.metrics().alerts, 0);
    }
}
