//! Transport modes and their assumed speeds.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the visitor moves between stops.
///
/// Parsing is lenient: any label other than `transit` or `drive` means
/// walking.
///
/// # Examples
/// ```
/// use itinera_core::TransportMode;
///
/// assert_eq!(TransportMode::from("drive"), TransportMode::Drive);
/// assert_eq!(TransportMode::from("hovercraft"), TransportMode::Walk);
/// assert_eq!(TransportMode::Transit.speed_kmh(), 18.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum TransportMode {
    /// On foot.
    #[default]
    Walk,
    /// Public transport.
    Transit,
    /// By car.
    Drive,
}

impl TransportMode {
    /// Assumed average speed in km/h.
    #[must_use]
    pub const fn speed_kmh(self) -> f64 {
        match self {
            Self::Walk => 4.5,
            Self::Transit => 18.0,
            Self::Drive => 35.0,
        }
    }

    /// Lowercase label used in payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Walk => "walk",
            Self::Transit => "transit",
            Self::Drive => "drive",
        }
    }
}

impl From<&str> for TransportMode {
    fn from(label: &str) -> Self {
        match label {
            "transit" => Self::Transit,
            "drive" => Self::Drive,
            other => {
                if other != "walk" {
                    log::debug!("unrecognised transport mode {other:?}; walking instead");
                }
                Self::Walk
            }
        }
    }
}

impl From<String> for TransportMode {
    fn from(label: String) -> Self {
        Self::from(label.as_str())
    }
}

impl From<TransportMode> for String {
    fn from(mode: TransportMode) -> Self {
        mode.as_str().to_owned()
    }
}

impl FromStr for TransportMode {
    type Err = Infallible;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(label))
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("walk", TransportMode::Walk)]
    #[case("transit", TransportMode::Transit)]
    #[case("drive", TransportMode::Drive)]
    #[case("Drive", TransportMode::Walk)]
    #[case("", TransportMode::Walk)]
    #[case("teleport", TransportMode::Walk)]
    fn parses_labels_leniently(#[case] label: &str, #[case] expected: TransportMode) {
        assert_eq!(TransportMode::from(label), expected);
    }

    #[rstest]
    fn label_round_trips_through_display() {
        for mode in [
            TransportMode::Walk,
            TransportMode::Transit,
            TransportMode::Drive,
        ] {
            assert_eq!(TransportMode::from(mode.to_string().as_str()), mode);
        }
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn unknown_payload_label_means_walk() {
        let mode: TransportMode = serde_json::from_str(r#""bicycle""#).expect("string payload");
        assert_eq!(mode, TransportMode::Walk);
    }
}
