//! Geographic value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Mean Earth radius in meters (IUGG).
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Creates a position, validating both axes.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::OutOfRange` for latitude outside [-90, 90]
    /// or longitude outside [-180, 180], and `InvalidFormat` for NaN.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if latitude.is_nan() || longitude.is_nan() {
            return Err(ValidationError::invalid_format("coordinates", "NaN"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::out_of_range(
                "latitude",
                -90,
                90,
                latitude as i64,
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::out_of_range(
                "longitude",
                -180,
                180,
                longitude as i64,
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` using the haversine formula.
    pub fn distance_to(&self, other: &Coordinates) -> Distance {
        let (lat1, lat2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        Distance::from_meters(EARTH_RADIUS_M * c)
    }
}

const UNREACHABLE_FLOOR: f64 = 1e300;

/// A non-negative distance in meters, or the unreachable sentinel.
///
/// The sentinel is `f64::MAX` rather than infinity so it survives JSON.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distance(f64);

impl Distance {
    pub const ZERO: Distance = Distance(0.0);
    pub const UNREACHABLE: Distance = Distance(f64::MAX);

    /// Creates a distance. Negative or NaN input is clamped to zero and
    /// non-finite input becomes the unreachable sentinel.
    pub fn from_meters(meters: f64) -> Self {
        if meters.is_nan() || meters <= 0.0 {
            Self::ZERO
        } else if !meters.is_finite() {
            Self::UNREACHABLE
        } else {
            Self(meters)
        }
    }

    pub fn meters(&self) -> f64 {
        self.0
    }

    /// Tolerates the last-digit rounding of a JSON round trip.
    pub fn is_unreachable(&self) -> bool {
        !self.0.is_finite() || self.0 >= UNREACHABLE_FLOOR
    }

    /// Sums two distances; anything plus unreachable stays unreachable.
    pub fn saturating_add(self, other: Distance) -> Distance {
        if self.is_unreachable() || other.is_unreachable() {
            Self::UNREACHABLE
        } else {
            Self::from_meters(self.0 + other.0)
        }
    }
}

impl Default for Distance {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unreachable() {
            write!(f, "unreachable")
        } else {
            write!(f, "{:.1} m", self.0)
        }
    }
}
