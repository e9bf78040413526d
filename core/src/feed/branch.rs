use crate::prelude::WatchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cities served by the provider, each mapped to its branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum City {
    Montreal,
    Quebec,
    #[default]
    Toronto,
}

impl City {
    pub const ALL: [City; 3] = [City::Montreal, City::Quebec, City::Toronto];

    pub fn name(self) -> &'static str {
        match self {
            City::Montreal => "montreal",
            City::Quebec => "quebec",
            City::Toronto => "toronto",
        }
    }

    /// Provider branch identifier used by the availability endpoint.
    pub fn branch_id(self) -> u32 {
        match self {
            City::Montreal => 1,
            City::Quebec => 2,
            City::Toronto => 3,
        }
    }

    /// Subdomain of the regional booking site.
    pub fn booking_host(self) -> &'static str {
        match self {
            City::Toronto => "ontario",
            City::Montreal | City::Quebec => "quebec",
        }
    }

    pub fn booking_url(self) -> String {
        format!("https://{}.client.reservauto.net/bookCar", self.booking_host())
    }

    pub fn supported_names() -> String {
        Self::ALL
            .iter()
            .map(|city| city.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = WatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|city| city.name() == wanted)
            .ok_or_else(|| WatchError::UnsupportedCity(s.to_string()))
    }
}
