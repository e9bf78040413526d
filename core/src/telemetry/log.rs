use crate::math::ladder::human_distance;
use log::info;
use std::time::Duration;

pub struct LogManager;

impl LogManager {
    pub fn new() -> Self {
        Self
    }

    pub fn record(&self, message: &str) {
        info!("{}", message);
    }

    /// One line per poll: how many vehicles came back and how many qualify.
    pub fn record_poll(&self, fetched: usize, within: usize, radius_m: u32, pause: Duration) {
        self.record(&poll_summary(fetched, within, radius_m, pause));
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}

fn poll_summary(fetched: usize, within: usize, radius_m: u32, pause: Duration) -> String {
    format!(
        "{} cars found. {} within {}. Waiting {} seconds",
        fetched,
        within,
        human_distance(radius_m),
        pause.as_secs()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_uses_human_radius() {
        assert_eq!(
            poll_summary(12, 2, 1500, Duration::from_secs(15)),
            "12 cars found. 2 within 1.5km. Waiting 15 seconds"
        );
    }
}
