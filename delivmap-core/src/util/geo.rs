use delivmap_entities::geo::{MapPoint, MapPolygon};
use geo::{Contains as _, LineString, Point, Polygon};

/// Point-in-polygon test over the boundary's vertex sequence.
///
/// Follows the `geo` crate convention: points on the polygon boundary
/// (vertices and edges) are NOT contained.
pub fn polygon_contains(boundary: &MapPolygon, pos: MapPoint) -> bool {
    let exterior: LineString = boundary
        .vertices()
        .iter()
        .map(|v| (v.lng_deg(), v.lat_deg()))
        .collect();
    let polygon = Polygon::new(exterior, vec![]);
    polygon.contains(&Point::new(pos.lng_deg(), pos.lat_deg()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lng: f64) -> MapPoint {
        MapPoint::try_from_lat_lng_deg(lat, lng).unwrap()
    }

    fn unit_square() -> MapPolygon {
        MapPolygon::try_from_vertices(vec![
            point(0.0, 0.0),
            point(0.0, 1.0),
            point(1.0, 1.0),
            point(1.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn strictly_inside_is_contained() {
        assert!(polygon_contains(&unit_square(), point(0.5, 0.5)));
    }

    #[test]
    fn strictly_outside_is_not_contained() {
        assert!(!polygon_contains(&unit_square(), point(1.5, 0.5)));
        assert!(!polygon_contains(&unit_square(), point(-0.1, 0.5)));
    }

    #[test]
    fn boundary_points_are_not_contained() {
        // Documents the library convention instead of assuming it.
        assert!(!polygon_contains(&unit_square(), point(0.0, 0.0)));
        assert!(!polygon_contains(&unit_square(), point(0.0, 0.5)));
    }
}
