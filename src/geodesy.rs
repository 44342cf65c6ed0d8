use std::f64::consts::PI;

/// Mean Earth radius in meters used by the haversine formula.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Tolerance in degrees for deciding whether a ring's last point closes it.
pub const CLOSING_EPSILON_DEG: f64 = 0.00001;

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        GeoPoint { lat, lon }
    }

    /// True when both axes agree within `CLOSING_EPSILON_DEG`.
    pub fn approx_eq(&self, other: &GeoPoint) -> bool {
        (self.lat - other.lat).abs() < CLOSING_EPSILON_DEG
            && (self.lon - other.lon).abs() < CLOSING_EPSILON_DEG
    }

    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        great_circle_distance(self, other)
    }
}

fn to_radians(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Haversine distance in meters between two points.
pub fn great_circle_distance(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let sin_delta_lat = (to_radians(to.lat - from.lat) / 2.0).sin();
    let sin_delta_lon = (to_radians(to.lon - from.lon) / 2.0).sin();
    let normed_dist = sin_delta_lat * sin_delta_lat
        + sin_delta_lon * sin_delta_lon * to_radians(from.lat).cos() * to_radians(to.lat).cos();

    2.0 * EARTH_RADIUS_M * normed_dist.sqrt().asin()
}

/// Distance in meters from `r` to the line through `a` and `b`.
///
/// Longitudes are scaled by the cosine of the segment's mean latitude so the
/// projection happens in a locally equirectangular plane. The projection is
/// onto the infinite line and is not clamped to the segment's endpoints.
///
/// Horizontal segments (`a.lat == b.lat`) measure only the latitude offset of
/// `r`, vertical segments (`a.lon == b.lon`) only its longitude offset.
pub fn distance_to_segment(r: &GeoPoint, a: &GeoPoint, b: &GeoPoint) -> f64 {
    let shrink_factor = to_radians((a.lat + b.lat) / 2.0).cos();

    let a_lon = a.lon * shrink_factor;
    let b_lon = b.lon * shrink_factor;
    let r_lon = r.lon * shrink_factor;

    let delta_lon = b_lon - a_lon;
    let delta_lat = b.lat - a.lat;

    if delta_lat == 0.0 {
        return great_circle_distance(&GeoPoint::new(a.lat, r.lon), r);
    }

    if delta_lon == 0.0 {
        return great_circle_distance(&GeoPoint::new(r.lat, a.lon), r);
    }

    let norm = delta_lon * delta_lon + delta_lat * delta_lat;
    let factor = ((r_lon - a_lon) * delta_lon + (r.lat - a.lat) * delta_lat) / norm;

    // c is the projection of r in shrunk space
    let c_lon = a_lon + factor * delta_lon;
    let c_lat = a.lat + factor * delta_lat;

    great_circle_distance(&GeoPoint::new(c_lat, c_lon / shrink_factor), r)
}
