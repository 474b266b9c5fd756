use serde::{Deserialize, Serialize};

/// Earth's mean radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Roughly how many miles one degree of latitude spans.
pub const MILES_PER_DEGREE: f64 = 69.0;

/// A point in request order: latitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle (haversine) distance to `other`, in miles.
    pub fn great_circle_miles(&self, other: &Coordinate) -> f64 {
        EARTH_RADIUS_MILES * self.central_angle(other)
    }

    /// Central angle between two points on a sphere, in radians.
    pub fn central_angle(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * a.sqrt().min(1.0).asin()
    }

    /// Flat distance in degrees, the metric legacy `$near` queries order by.
    pub fn planar_degrees(&self, other: &Coordinate) -> f64 {
        (self.latitude - other.latitude).hypot(self.longitude - other.longitude)
    }
}

impl From<geolocate::LatLng> for Coordinate {
    fn from(value: geolocate::LatLng) -> Self {
        Self::new(value.lat, value.lng)
    }
}

/// A point in store order: `[longitude, latitude]`.
///
/// The vendor collection stores `loc` longitude first. Converting between
/// [`Coordinate`] and `Position` is the only place the axes are swapped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Position {
    pub longitude: f64,
    pub latitude: f64,
}

impl Position {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl From<[f64; 2]> for Position {
    fn from([longitude, latitude]: [f64; 2]) -> Self {
        Self::new(longitude, latitude)
    }
}

impl From<Position> for [f64; 2] {
    fn from(position: Position) -> Self {
        [position.longitude, position.latitude]
    }
}

impl From<Coordinate> for Position {
    fn from(coordinate: Coordinate) -> Self {
        Self::new(coordinate.longitude, coordinate.latitude)
    }
}

impl From<Position> for Coordinate {
    fn from(position: Position) -> Self {
        Self::new(position.latitude, position.longitude)
    }
}

/// The coordinates a location descriptor resolved to.
///
/// The shape decides which geospatial strategy runs: a single point drives a
/// radius or nearest query, two corners drive a box query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedLocation {
    Point(Coordinate),
    Box([Coordinate; 2]),
}

impl ResolvedLocation {
    /// The origin for distance computation. Boxes have none.
    pub fn anchor(&self) -> Option<Coordinate> {
        match self {
            Self::Point(point) => Some(*point),
            Self::Box(_) => None,
        }
    }
}
