use std::fmt;

/// A geographical position on the map.
///
/// Both coordinates are stored in degrees and are guaranteed to be
/// finite and within range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPoint {
    lat: f64,
    lng: f64,
}

impl MapPoint {
    pub fn try_from_lat_lng_deg(lat: f64, lng: f64) -> Option<Self> {
        (lat.is_finite() && lng.is_finite() && lat.abs() <= 90.0 && lng.abs() <= 180.0)
            .then_some(Self { lat, lng })
    }

    pub fn lat_deg(self) -> f64 {
        self.lat
    }

    pub fn lng_deg(self) -> f64 {
        self.lng
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// A simple closed region given by an ordered vertex sequence.
///
/// The closing edge from the last back to the first vertex is implicit.
/// Self-intersection is neither assumed nor checked.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPolygon {
    vertices: Vec<MapPoint>,
}

impl MapPolygon {
    pub fn try_from_vertices(vertices: Vec<MapPoint>) -> Option<Self> {
        (vertices.len() >= 3).then_some(Self { vertices })
    }

    pub fn vertices(&self) -> &[MapPoint] {
        &self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_out_of_range_coordinates() {
        assert!(MapPoint::try_from_lat_lng_deg(90.1, 0.0).is_none());
        assert!(MapPoint::try_from_lat_lng_deg(0.0, -180.1).is_none());
        assert!(MapPoint::try_from_lat_lng_deg(f64::NAN, 0.0).is_none());
        assert!(MapPoint::try_from_lat_lng_deg(-90.0, 180.0).is_some());
    }

    #[test]
    fn polygon_needs_at_least_three_vertices() {
        let a = MapPoint::try_from_lat_lng_deg(0.0, 0.0).unwrap();
        let b = MapPoint::try_from_lat_lng_deg(0.0, 1.0).unwrap();
        let c = MapPoint::try_from_lat_lng_deg(1.0, 0.0).unwrap();
        assert!(MapPolygon::try_from_vertices(vec![a, b]).is_none());
        assert!(MapPolygon::try_from_vertices(vec![a, b, c]).is_some());
    }
}
