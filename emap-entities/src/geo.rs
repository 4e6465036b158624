use std::{fmt, str::FromStr};

use thiserror::Error;

const LAT_DEG_MAX: f64 = 90.0;
const LAT_DEG_MIN: f64 = -90.0;
const LNG_DEG_MAX: f64 = 180.0;
const LNG_DEG_MIN: f64 = -180.0;

/// A geographical location given in degrees.
///
/// The coordinates are not restricted to their valid ranges. Computations on
/// out-of-range points are well defined but meaningless.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MapPoint {
    lat: f64,
    lng: f64,
}

impl MapPoint {
    pub fn from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(lat: LAT, lng: LNG) -> Self {
        Self {
            lat: lat.into(),
            lng: lng.into(),
        }
    }

    pub fn try_from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(
        lat: LAT,
        lng: LNG,
    ) -> Option<Self> {
        let pt = Self::from_lat_lng_deg(lat, lng);
        pt.is_valid().then_some(pt)
    }

    pub const fn lat(self) -> f64 {
        self.lat
    }

    pub const fn lng(self) -> f64 {
        self.lng
    }

    pub fn is_valid(self) -> bool {
        (LAT_DEG_MIN..=LAT_DEG_MAX).contains(&self.lat)
            && (LNG_DEG_MIN..=LNG_DEG_MAX).contains(&self.lng)
    }

    pub fn to_lat_lng_rad(self) -> (f64, f64) {
        (self.lat.to_radians(), self.lng.to_radians())
    }

    pub const fn to_lat_lng_deg(self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseMapPointError {
    #[error("Expected '<lat>,<lng>' but got '{0}'")]
    Format(String),
    #[error("Invalid latitude '{0}'")]
    Lat(String),
    #[error("Invalid longitude '{0}'")]
    Lng(String),
    #[error("Coordinates out of range: {0}")]
    OutOfRange(String),
}

impl FromStr for MapPoint {
    type Err = ParseMapPointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((lat_str, lng_str)) = s.split_once(',') else {
            return Err(ParseMapPointError::Format(s.to_owned()));
        };
        let lat = lat_str
            .trim()
            .parse::<f64>()
            .map_err(|_| ParseMapPointError::Lat(lat_str.to_owned()))?;
        let lng = lng_str
            .trim()
            .parse::<f64>()
            .map_err(|_| ParseMapPointError::Lng(lng_str.to_owned()))?;
        Self::try_from_lat_lng_deg(lat, lng)
            .ok_or_else(|| ParseMapPointError::OutOfRange(s.to_owned()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Distance(pub f64);

impl Distance {
    pub const fn infinite() -> Self {
        Self(f64::INFINITY)
    }

    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    pub const fn to_meters(self) -> f64 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self.0 >= 0.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} m", self.0)
    }
}

const MEAN_EARTH_RADIUS: Distance = Distance::from_meters(6_371_000.0);

impl MapPoint {
    /// Calculate the great-circle distance on the surface
    /// of the earth using the haversine formula.
    /// Reference: <https://en.wikipedia.org/wiki/Haversine_formula>
    pub fn distance(p1: MapPoint, p2: MapPoint) -> Distance {
        let (lat1_rad, lng1_rad) = p1.to_lat_lng_rad();
        let (lat2_rad, lng2_rad) = p2.to_lat_lng_rad();

        let dlat_half_sin = ((lat2_rad - lat1_rad) / 2.0).sin();
        let dlng_half_sin = ((lng2_rad - lng1_rad) / 2.0).sin();

        let a = dlat_half_sin * dlat_half_sin
            + lat1_rad.cos() * lat2_rad.cos() * dlng_half_sin * dlng_half_sin;
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        Distance::from_meters(MEAN_EARTH_RADIUS.to_meters() * c)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn assert_symmetric(a: MapPoint, b: MapPoint) {
        let ab = MapPoint::distance(a, b).to_meters();
        let ba = MapPoint::distance(b, a).to_meters();
        assert!((ab - ba).abs() < 1e-6, "{ab} != {ba}");
    }

    #[test]
    fn no_distance() {
        let p1 = MapPoint::from_lat_lng_deg(0.0, 0.0);
        assert_eq!(MapPoint::distance(p1, p1).to_meters(), 0.0);

        let p2 = MapPoint::from_lat_lng_deg(-25.0, 55.0);
        assert_eq!(MapPoint::distance(p2, p2).to_meters(), 0.0);

        let p1 = MapPoint::from_lat_lng_deg(-15.0, -180.0);
        let p2 = MapPoint::from_lat_lng_deg(-15.0, 180.0);
        assert!(MapPoint::distance(p1, p2).to_meters() < 0.000_001);
    }

    #[test]
    fn real_distance() {
        let stuttgart = MapPoint::from_lat_lng_deg(48.7755, 9.1827);
        let mannheim = MapPoint::from_lat_lng_deg(49.4836, 8.4630);
        assert!(MapPoint::distance(stuttgart, mannheim) > Distance::from_meters(94_000.0));
        assert!(MapPoint::distance(stuttgart, mannheim) < Distance::from_meters(95_000.0));

        let new_york = MapPoint::from_lat_lng_deg(40.714_268, -74.005_974);
        let sidney = MapPoint::from_lat_lng_deg(-33.867_138, 151.207_108);
        assert!(MapPoint::distance(new_york, sidney) > Distance::from_meters(15_985_000.0));
        assert!(MapPoint::distance(new_york, sidney) < Distance::from_meters(15_995_000.0));
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = MapPoint::from_lat_lng_deg(50.0, 11.9);
        let b = MapPoint::from_lat_lng_deg(51.0, 11.9);
        let expected = 6_371_000.0 * 1f64.to_radians();
        assert!((MapPoint::distance(a, b).to_meters() - expected).abs() < 1e-6);
    }

    #[test]
    fn symmetric_distance() {
        assert_symmetric(
            MapPoint::from_lat_lng_deg(80.0, 0.0),
            MapPoint::from_lat_lng_deg(90.0, 20.0),
        );
        assert_symmetric(
            MapPoint::from_lat_lng_deg(50.3167, 11.9167),
            MapPoint::from_lat_lng_deg(50.3201, 11.9302),
        );
        assert_symmetric(
            MapPoint::from_lat_lng_deg(-37.444_891, -124.467_589),
            MapPoint::from_lat_lng_deg(29.297_244, 0.032_188),
        );
    }

    #[test]
    fn out_of_range_points_do_not_panic() {
        let a = MapPoint::from_lat_lng_deg(123.0, 456.0);
        let b = MapPoint::from_lat_lng_deg(-300.0, 0.0);
        assert!(!a.is_valid());
        assert!(MapPoint::distance(a, b).to_meters().is_finite());
    }

    #[test]
    fn positive_distance_regressions() {
        let p1 = MapPoint::from_lat_lng_deg(-81.228_104_178_434_3, 77.757_477_759_270_69);
        let p2 = MapPoint::from_lat_lng_deg(40.921_165_105_384_38, -93.333_032_239_849_23);
        assert!(MapPoint::distance(p1, p2).is_valid());

        let p1 = MapPoint::from_lat_lng_deg(67.015_681_470_285_95, 122.102_768_245_200_99);
        let p2 = MapPoint::from_lat_lng_deg(-87.847_093_626_785_61, 132.716_914_225_703_53);
        assert!(MapPoint::distance(p1, p2).is_valid());
    }

    #[test]
    fn try_from_deg() {
        assert!(MapPoint::try_from_lat_lng_deg(90.0, 180.0).is_some());
        assert!(MapPoint::try_from_lat_lng_deg(-90.0, -180.0).is_some());
        assert!(MapPoint::try_from_lat_lng_deg(90.000_001, 0.0).is_none());
        assert!(MapPoint::try_from_lat_lng_deg(0.0, -180.000_001).is_none());
        assert!(MapPoint::try_from_lat_lng_deg(f64::NAN, 0.0).is_none());
    }

    #[test]
    fn parse_map_point() {
        let pt: MapPoint = "50.3167, 11.9167".parse().unwrap();
        assert_eq!(pt, MapPoint::from_lat_lng_deg(50.3167, 11.9167));
        assert_eq!(pt.to_string().parse::<MapPoint>().unwrap(), pt);
        assert!(matches!(
            "50.3".parse::<MapPoint>(),
            Err(ParseMapPointError::Format(_))
        ));
        assert!(matches!(
            "x,1".parse::<MapPoint>(),
            Err(ParseMapPointError::Lat(_))
        ));
        assert!(matches!(
            "1,y".parse::<MapPoint>(),
            Err(ParseMapPointError::Lng(_))
        ));
        assert!(matches!(
            "91,0".parse::<MapPoint>(),
            Err(ParseMapPointError::OutOfRange(_))
        ));
    }
}
