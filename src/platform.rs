//! Nexus platform families
//!
//! Property support differs between Nexus hardware families. The schema
//! records which families lack a property; the facade reports which family
//! it is talking to.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported Nexus platform families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Nexus 3000
    N3k,
    /// Nexus 5000
    N5k,
    /// Nexus 6000
    N6k,
    /// Nexus 7000
    N7k,
    /// Nexus 9000 (default)
    #[default]
    N9k,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::N3k,
        Platform::N5k,
        Platform::N6k,
        Platform::N7k,
        Platform::N9k,
    ];
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::N3k => write!(f, "n3k"),
            Platform::N5k => write!(f, "n5k"),
            Platform::N6k => write!(f, "n6k"),
            Platform::N7k => write!(f, "n7k"),
            Platform::N9k => write!(f, "n9k"),
        }
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "n3k" | "nexus3000" | "n3000" => Ok(Platform::N3k),
            "n5k" | "nexus5000" | "n5000" => Ok(Platform::N5k),
            "n6k" | "nexus6000" | "n6000" => Ok(Platform::N6k),
            "n7k" | "nexus7000" | "n7000" => Ok(Platform::N7k),
            "n9k" | "nexus9000" | "n9000" => Ok(Platform::N9k),
            _ => Err(Error::Config(format!(
                "Unknown platform: {}. Valid options: n3k, n5k, n6k, n7k, n9k",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_round_trip_names() {
        for platform in Platform::ALL {
            assert_eq!(platform.to_string().parse::<Platform>().unwrap(), platform);
        }
    }

    #[test]
    fn test_platform_aliases() {
        assert_eq!("Nexus-7000".parse::<Platform>().unwrap(), Platform::N7k);
        assert!("catalyst".parse::<Platform>().is_err());
    }
}
