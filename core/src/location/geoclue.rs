use super::LocationProvider;
use crate::prelude::{Coordinate, WatchError, WatchResult};
use log::info;
use tokio::process::Command;

pub const WHERE_AM_I: &str = "/usr/libexec/geoclue-2.0/demos/where-am-i";

/// Asks the geoclue daemon through its `where-am-i` demo client.
#[derive(Debug, Clone)]
pub struct GeoclueLocation {
    program: String,
    timeout_secs: u32,
}

impl GeoclueLocation {
    pub fn new() -> Self {
        Self {
            program: WHERE_AM_I.to_string(),
            timeout_secs: 6,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl Default for GeoclueLocation {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationProvider for GeoclueLocation {
    async fn resolve(&self) -> WatchResult<Coordinate> {
        info!("Getting current location");
        let output = Command::new(&self.program)
            .arg("-t")
            .arg(self.timeout_secs.to_string())
            .output()
            .await
            .map_err(|e| {
                WatchError::LocationResolution(format!("could not run {}: {}", self.program, e))
            })?;

        parse_where_am_i(&String::from_utf8_lossy(&output.stdout)).ok_or_else(|| {
            WatchError::LocationResolution("geoclue reported no position".into())
        })
    }
}

/// Extracts `Latitude:` / `Longitude:` lines; values may carry a `°` suffix.
pub fn parse_where_am_i(output: &str) -> Option<Coordinate> {
    let mut latitude = None;
    let mut longitude = None;

    for line in output.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value
            .trim()
            .trim_end_matches(|c: char| !c.is_ascii_digit())
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite());
        match key.trim() {
            "Latitude" => latitude = value,
            "Longitude" => longitude = value,
            _ => {}
        }
    }

    Some(Coordinate::new(latitude?, longitude?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_where_am_i_report() {
        let output = "Client object: /org/freedesktop/GeoClue2/Client/1\n\
                      New location:\n\
                      Latitude:    43.653200°\n\
                      Longitude:   -79.383200°\n\
                      Accuracy:    25000.000000 meters\n";

        assert_eq!(
            parse_where_am_i(output),
            Some(Coordinate::new(43.6532, -79.3832))
        );
    }

    #[test]
    fn missing_longitude_is_no_position() {
        assert_eq!(parse_where_am_i("Latitude: 43.6\n"), None);
        assert_eq!(parse_where_am_i(""), None);
    }

    #[tokio::test]
    async fn missing_binary_is_a_resolution_error() {
        let provider = GeoclueLocation::new().with_program("/nonexistent/where-am-i");
        let err = provider.resolve().await.unwrap_err();
        assert!(matches!(err, WatchError::LocationResolution(_)));
    }
}
