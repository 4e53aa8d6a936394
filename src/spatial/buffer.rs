use geo::{BooleanOps, Coord, ConvexHull, MultiPoint, MultiPolygon, Point, Polygon};

use crate::utils::constants::BUFFER_CIRCLE_SEGMENTS;

/// Expand a polygon outward by `distance` (in the units of its coordinate
/// system, so meters for projected geometry).
///
/// The buffered region is the union of the polygon with a capsule around
/// every boundary segment, which is the Minkowski sum of the polygon with a
/// disc up to circle discretization. Non-positive distances return the input
/// unchanged.
pub fn buffer_multi_polygon(geometry: &MultiPolygon<f64>, distance: f64) -> MultiPolygon<f64> {
    if distance <= 0.0 {
        return geometry.clone();
    }

    let mut result = geometry.clone();
    for polygon in &geometry.0 {
        for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
            for segment in ring.lines() {
                let capsule = segment_capsule(segment.start, segment.end, distance);
                result = result.union(&MultiPolygon::new(vec![capsule]));
            }
        }
    }
    result
}

/// Capsule (stadium) around a segment: the convex hull of the discretized
/// discs at both endpoints.
fn segment_capsule(start: Coord<f64>, end: Coord<f64>, radius: f64) -> Polygon<f64> {
    let mut points: Vec<Point<f64>> =
        Vec::with_capacity(2 * BUFFER_CIRCLE_SEGMENTS);
    points.extend(circle_points(start, radius));
    points.extend(circle_points(end, radius));
    MultiPoint::new(points).convex_hull()
}

fn circle_points(center: Coord<f64>, radius: f64) -> Vec<Point<f64>> {
    (0..BUFFER_CIRCLE_SEGMENTS)
        .map(|i| {
            let angle = 2.0 * std::f64::consts::PI * i as f64 / BUFFER_CIRCLE_SEGMENTS as f64;
            Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Area, Contains, LineString};

    fn unit_square() -> MultiPolygon<f64> {
        MultiPolygon::new(vec![Polygon::new(
            LineString::from(vec![
                (0.0, 0.0),
                (1.0, 0.0),
                (1.0, 1.0),
                (0.0, 1.0),
                (0.0, 0.0),
            ]),
            vec![],
        )])
    }

    #[test]
    fn test_zero_distance_returns_input() {
        let square = unit_square();
        let buffered = buffer_multi_polygon(&square, 0.0);
        assert_eq!(buffered, square);
    }

    #[test]
    fn test_buffer_grows_area() {
        let square = unit_square();
        let buffered = buffer_multi_polygon(&square, 0.5);
        // Exact buffered area is 1 + 4*0.5 + pi*0.25; discretization stays
        // within a percent of it.
        let expected = 1.0 + 4.0 * 0.5 + std::f64::consts::PI * 0.25;
        let area = buffered.unsigned_area();
        assert!((area - expected).abs() / expected < 0.01, "area was {area}");
    }

    #[test]
    fn test_buffer_contains_nearby_points() {
        let square = unit_square();
        let buffered = buffer_multi_polygon(&square, 0.5);

        // Just outside the square but inside the buffer.
        assert!(buffered.contains(&Point::new(-0.3, 0.5)));
        assert!(buffered.contains(&Point::new(0.5, 1.4)));
        // Beyond the buffer distance.
        assert!(!buffered.contains(&Point::new(-0.6, 0.5)));
        // Diagonal corner: Euclidean distance from (1,1) must be < 0.5.
        assert!(buffered.contains(&Point::new(1.3, 1.3)));
        assert!(!buffered.contains(&Point::new(1.4, 1.4)));
    }
}
