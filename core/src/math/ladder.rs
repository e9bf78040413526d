use crate::prelude::{WatchError, WatchResult};

/// Default thresholds in meters, widest first.
pub const DEFAULT_RUNGS: [u32; 17] = [
    10000, 8000, 6000, 5000, 4000, 3000, 2000, 1500, 1000, 900, 800, 700, 600, 500, 400, 300, 200,
];

/// Strictly descending set of search radii the user can step down through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadiusLadder {
    rungs: Vec<u32>,
}

impl RadiusLadder {
    pub fn new(rungs: Vec<u32>) -> WatchResult<Self> {
        if rungs.is_empty() {
            return Err(WatchError::InvalidInput("radius ladder is empty".into()));
        }
        if rungs.windows(2).any(|pair| pair[0] <= pair[1]) {
            return Err(WatchError::InvalidInput(
                "radius ladder must be strictly descending".into(),
            ));
        }
        Ok(Self { rungs })
    }

    pub fn rungs(&self) -> &[u32] {
        &self.rungs
    }

    pub fn widest(&self) -> u32 {
        self.rungs[0]
    }

    pub fn narrowest(&self) -> u32 {
        self.rungs[self.rungs.len() - 1]
    }

    /// Largest rung strictly below `distance`, if any.
    pub fn next_smaller(&self, distance: f64) -> Option<u32> {
        self.rungs
            .iter()
            .copied()
            .find(|&rung| f64::from(rung) < distance)
    }
}

impl Default for RadiusLadder {
    fn default() -> Self {
        Self {
            rungs: DEFAULT_RUNGS.to_vec(),
        }
    }
}

/// Formats a radius the way it is shown to the user: `800m`, `1.5km`, `10km`.
pub fn human_distance(meters: u32) -> String {
    if meters < 1000 {
        format!("{}m", meters)
    } else {
        format!("{}km", f64::from(meters) / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_smaller_picks_rung_below_distance() {
        let ladder = RadiusLadder::default();
        assert_eq!(ladder.next_smaller(950.0), Some(900));
        assert_eq!(ladder.next_smaller(800.0), Some(700));
        assert_eq!(ladder.next_smaller(12_000.0), Some(10_000));
    }

    #[test]
    fn next_smaller_is_none_at_bottom_of_ladder() {
        let ladder = RadiusLadder::default();
        assert_eq!(ladder.next_smaller(150.0), None);
        assert_eq!(ladder.next_smaller(200.0), None);
        assert_eq!(ladder.next_smaller(200.5), Some(200));
    }

    #[test]
    fn ladder_rejects_unordered_rungs() {
        assert!(RadiusLadder::new(vec![]).is_err());
        assert!(RadiusLadder::new(vec![500, 500]).is_err());
        assert!(RadiusLadder::new(vec![200, 500]).is_err());
        let ladder = RadiusLadder::new(vec![500, 200]).unwrap();
        assert_eq!((ladder.widest(), ladder.narrowest()), (500, 200));
    }

    #[test]
    fn human_distance_switches_to_kilometers() {
        assert_eq!(human_distance(800), "800m");
        assert_eq!(human_distance(1000), "1km");
        assert_eq!(human_distance(1500), "1.5km");
        assert_eq!(human_distance(10000), "10km");
    }
}
