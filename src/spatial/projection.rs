use geo::{Coord, MapCoords, MultiPolygon, Point};

/// Ellipsoidal transverse Mercator projection.
///
/// The pipeline buffers basin polygons in meters, which requires leaving
/// geographic coordinates for a projected, meter-based reference. The fixed
/// reference used throughout is EPSG:3763 (ETRS89 / Portugal TM06), matching
/// the buffering convention of the source datasets.
#[derive(Debug, Clone)]
pub struct TransverseMercator {
    /// Semi-major axis (m).
    a: f64,
    /// Squared first eccentricity.
    e2: f64,
    /// Squared second eccentricity.
    ep2: f64,
    /// Latitude of natural origin (rad).
    lat0: f64,
    /// Longitude of natural origin (rad).
    lon0: f64,
    /// Scale factor at the natural origin.
    k0: f64,
    false_easting: f64,
    false_northing: f64,
    /// Meridional arc at the origin latitude.
    m0: f64,
}

impl TransverseMercator {
    /// EPSG:3763 on the GRS80 ellipsoid.
    pub fn portugal_tm06() -> Self {
        let lat0 = 39.0 + 40.0 / 60.0 + 5.73 / 3600.0;
        let lon0 = -(8.0 + 7.0 / 60.0 + 59.19 / 3600.0);
        Self::new(6_378_137.0, 1.0 / 298.257_222_101, lat0, lon0, 1.0, 0.0, 0.0)
    }

    pub fn new(
        a: f64,
        f: f64,
        lat0_deg: f64,
        lon0_deg: f64,
        k0: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        let e2 = f * (2.0 - f);
        let ep2 = e2 / (1.0 - e2);
        let lat0 = lat0_deg.to_radians();
        let mut tm = Self {
            a,
            e2,
            ep2,
            lat0,
            lon0: lon0_deg.to_radians(),
            k0,
            false_easting,
            false_northing,
            m0: 0.0,
        };
        tm.m0 = tm.meridional_arc(lat0);
        tm
    }

    /// Meridional arc length from the equator to `lat` (Snyder eq. 3-21).
    fn meridional_arc(&self, lat: f64) -> f64 {
        let e2 = self.e2;
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        self.a
            * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * lat
                - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * lat).sin()
                + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * lat).sin()
                - (35.0 * e6 / 3072.0) * (6.0 * lat).sin())
    }

    /// Geographic degrees (lon, lat) to projected meters (x, y).
    pub fn project(&self, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
        let lat = lat_deg.to_radians();
        let lon = lon_deg.to_radians();

        let sin_lat = lat.sin();
        let cos_lat = lat.cos();
        let tan_lat = lat.tan();

        let n = self.a / (1.0 - self.e2 * sin_lat * sin_lat).sqrt();
        let t = tan_lat * tan_lat;
        let c = self.ep2 * cos_lat * cos_lat;
        let a_term = (lon - self.lon0) * cos_lat;
        let m = self.meridional_arc(lat);

        let a2 = a_term * a_term;
        let a3 = a2 * a_term;
        let a4 = a3 * a_term;
        let a5 = a4 * a_term;
        let a6 = a5 * a_term;

        let x = self.false_easting
            + self.k0
                * n
                * (a_term
                    + (1.0 - t + c) * a3 / 6.0
                    + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * self.ep2) * a5 / 120.0);
        let y = self.false_northing
            + self.k0
                * (m - self.m0
                    + n * tan_lat
                        * (a2 / 2.0
                            + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                            + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * self.ep2) * a6
                                / 720.0));

        (x, y)
    }

    /// Projected meters (x, y) back to geographic degrees (lon, lat).
    pub fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        let e2 = self.e2;
        let e1 = (1.0 - (1.0 - e2).sqrt()) / (1.0 + (1.0 - e2).sqrt());

        let m = self.m0 + (y - self.false_northing) / self.k0;
        let mu = m
            / (self.a
                * (1.0 - e2 / 4.0 - 3.0 * e2 * e2 / 64.0 - 5.0 * e2 * e2 * e2 / 256.0));

        let e1_2 = e1 * e1;
        let e1_3 = e1_2 * e1;
        let e1_4 = e1_3 * e1;
        let lat1 = mu
            + (3.0 * e1 / 2.0 - 27.0 * e1_3 / 32.0) * (2.0 * mu).sin()
            + (21.0 * e1_2 / 16.0 - 55.0 * e1_4 / 32.0) * (4.0 * mu).sin()
            + (151.0 * e1_3 / 96.0) * (6.0 * mu).sin()
            + (1097.0 * e1_4 / 512.0) * (8.0 * mu).sin();

        let sin_lat1 = lat1.sin();
        let cos_lat1 = lat1.cos();
        let tan_lat1 = lat1.tan();

        let c1 = self.ep2 * cos_lat1 * cos_lat1;
        let t1 = tan_lat1 * tan_lat1;
        let n1 = self.a / (1.0 - e2 * sin_lat1 * sin_lat1).sqrt();
        let r1 = self.a * (1.0 - e2) / (1.0 - e2 * sin_lat1 * sin_lat1).powf(1.5);
        let d = (x - self.false_easting) / (n1 * self.k0);

        let d2 = d * d;
        let d3 = d2 * d;
        let d4 = d3 * d;
        let d5 = d4 * d;
        let d6 = d5 * d;

        let lat = lat1
            - (n1 * tan_lat1 / r1)
                * (d2 / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * self.ep2) * d4 / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1
                        - 252.0 * self.ep2
                        - 3.0 * c1 * c1)
                        * d6
                        / 720.0);
        let lon = self.lon0
            + (d - (1.0 + 2.0 * t1 + c1) * d3 / 6.0
                + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * self.ep2 + 24.0 * t1 * t1)
                    * d5
                    / 120.0)
                / cos_lat1;

        (lon.to_degrees(), lat.to_degrees())
    }

    pub fn project_point(&self, point: &Point<f64>) -> Point<f64> {
        let (x, y) = self.project(point.x(), point.y());
        Point::new(x, y)
    }

    pub fn project_multi_polygon(&self, geometry: &MultiPolygon<f64>) -> MultiPolygon<f64> {
        geometry.map_coords(|Coord { x, y }| {
            let (px, py) = self.project(x, y);
            Coord { x: px, y: py }
        })
    }

    pub fn unproject_multi_polygon(&self, geometry: &MultiPolygon<f64>) -> MultiPolygon<f64> {
        geometry.map_coords(|Coord { x, y }| {
            let (lon, lat) = self.unproject(x, y);
            Coord { x: lon, y: lat }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_maps_to_false_origin() {
        let tm = TransverseMercator::portugal_tm06();
        let (x, y) = tm.project(-(8.0 + 7.0 / 60.0 + 59.19 / 3600.0), 39.0 + 40.0 / 60.0 + 5.73 / 3600.0);
        assert!(x.abs() < 1e-6, "x at origin was {x}");
        assert!(y.abs() < 1e-6, "y at origin was {y}");
    }

    #[test]
    fn test_roundtrip_near_lisbon() {
        let tm = TransverseMercator::portugal_tm06();
        let (lon, lat) = (-9.1393, 38.7223);
        let (x, y) = tm.project(lon, lat);
        let (lon2, lat2) = tm.unproject(x, y);
        assert!((lon - lon2).abs() < 1e-9);
        assert!((lat - lat2).abs() < 1e-9);
        // Lisbon is west and south of the TM06 origin.
        assert!(x < 0.0);
        assert!(y < 0.0);
    }

    #[test]
    fn test_projected_distances_are_metric() {
        let tm = TransverseMercator::portugal_tm06();
        // One degree of latitude near the origin is ~111 km.
        let (_, y1) = tm.project(-8.0, 39.0);
        let (_, y2) = tm.project(-8.0, 40.0);
        let dist = (y2 - y1).abs();
        assert!((dist - 111_000.0).abs() < 1_000.0, "distance was {dist}");
    }

    #[test]
    fn test_roundtrip_within_zone() {
        let tm = TransverseMercator::portugal_tm06();
        for (lon, lat) in [(-6.5, 41.8), (-9.5, 37.0), (-7.9, 39.7)] {
            let (x, y) = tm.project(lon, lat);
            let (lon2, lat2) = tm.unproject(x, y);
            assert!((lon - lon2).abs() < 1e-9);
            assert!((lat - lat2).abs() < 1e-9);
        }
    }
}
