//! Observation data model and table parsing.
//!
//! An observation pairs a horizontal-coordinate reading (azimuth/altitude)
//! with the latitude/longitude reference it was taken against. All angles
//! are stored in radians; observations are immutable once produced and
//! indexed by animation frame number.

mod parse;

pub use parse::{parse_table, ParseError};

use serde::{Deserialize, Serialize};

/// One recorded sighting, all angles in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Latitude of the reference point.
    pub lat: f64,
    /// Longitude of the reference point.
    pub lon: f64,
    /// Azimuth of the sighted direction, relative to the local horizon.
    pub azm: f64,
    /// Altitude of the sighted direction above the local horizon.
    pub alt: f64,
}

impl Observation {
    /// Creates an observation from radian angles.
    pub fn new(lat: f64, lon: f64, azm: f64, alt: f64) -> Self {
        Self { lat, lon, azm, alt }
    }

    /// Creates an observation from degree angles.
    pub fn from_degrees(lat: f64, lon: f64, azm: f64, alt: f64) -> Self {
        Self {
            lat: lat.to_radians(),
            lon: lon.to_radians(),
            azm: azm.to_radians(),
            alt: alt.to_radians(),
        }
    }

    /// Returns the four angles in degrees, in `(lat, lon, azm, alt)` order.
    pub fn to_degrees(self) -> (f64, f64, f64, f64) {
        (
            self.lat.to_degrees(),
            self.lon.to_degrees(),
            self.azm.to_degrees(),
            self.alt.to_degrees(),
        )
    }
}
