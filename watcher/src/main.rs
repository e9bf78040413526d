use anyhow::Context;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use workflow::config::WatchConfig;
use workflow::runner::{self, Shutdown};

mod desktop;
mod workflow;

#[derive(Parser, Debug)]
#[command(author, version, about = "Alerts when a car-sharing vehicle is available nearby")]
struct Args {
    /// Delay between requests, in seconds (default: 15)
    #[arg(short, long)]
    delay: Option<u64>,
    /// City name (default: toronto). Supported cities: montreal, quebec, toronto
    #[arg(short, long)]
    city: Option<String>,
    /// Location coordinates, e.g. "43.7,-79.4"
    #[arg(short, long, allow_hyphen_values = true)]
    location: Option<String>,
    /// Initial search radius in meters (default: widest rung)
    #[arg(long)]
    radius: Option<u32>,
    /// Load settings from YAML; flags override file values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Exit instead of waiting for the next poll when a fetch keeps failing
    #[arg(long, default_value_t = false)]
    fail_fast: bool,
}

impl Args {
    fn apply(self, config: &mut WatchConfig) {
        if let Some(delay) = self.delay {
            config.delay_secs = delay;
        }
        if let Some(city) = self.city {
            config.city = city;
        }
        if let Some(location) = self.location {
            config.location = Some(location);
        }
        if let Some(radius) = self.radius {
            config.initial_radius_m = Some(radius);
        }
        config.fail_fast |= self.fail_fast;
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = if let Some(path) = args.config.as_ref() {
        WatchConfig::load(path)?
    } else {
        WatchConfig::default()
    };
    args.apply(&mut config);

    let plan = config.validate()?;
    info!(
        "Using City Branch: {}. Branch ID: {}",
        plan.city,
        plan.city.branch_id()
    );

    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime for the poll loop")?;
    match runtime.block_on(runner::run(plan))? {
        Shutdown::Stopped => info!("Stopped looking"),
        Shutdown::Interrupted => info!("Stopped by Ctrl+C"),
    }

    Ok(())
}
