//! Great-circle path construction for flat (equirectangular) map rendering.
//!
//! Arcs are sampled with spherical linear interpolation and then split
//! wherever consecutive samples jump across the ±180° meridian, so a
//! renderer never draws a line spanning the whole map width.

use std::iter::FusedIterator;

use crate::models::GeoPoint;
use crate::spatial::{add, dot, from_vector, norm, scale, sub, to_unit_vector, Vec3};

/// Upper bound on samples per arc.
pub const MAX_ARC_SAMPLES: usize = 4096;

/// Separation (radians) at or below which the arc collapses to its two endpoints.
const DEGENERATE_OMEGA: f64 = 0.0;
/// Below this, `p2 - (p1·p2)p1` is too short to define a direction.
const ANTIPODAL_EPS: f64 = 1e-12;

/// A sampled great-circle arc.
///
/// Points are computed on demand; the arc can be iterated any number of times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreatCircle {
    start: GeoPoint,
    end: GeoPoint,
    origin: Vec3,
    /// Unit tangent at `origin` pointing along the arc.
    tangent: Vec3,
    omega: f64,
    intervals: usize,
}

/// Build the great-circle arc between two points.
///
/// Yields `sample_count + 1` points (two for identical endpoints). `sample_count`
/// is clamped to `1..=MAX_ARC_SAMPLES`.
pub fn build_great_circle(start: GeoPoint, end: GeoPoint, sample_count: usize) -> GreatCircle {
    let origin = to_unit_vector(start);
    let target = to_unit_vector(end);
    let cos_omega = dot(origin, target).clamp(-1.0, 1.0);
    let omega = cos_omega.acos();

    if omega <= DEGENERATE_OMEGA {
        return GreatCircle {
            start,
            end,
            origin,
            tangent: [0.0; 3],
            omega: 0.0,
            intervals: 1,
        };
    }

    GreatCircle {
        start,
        end,
        origin,
        tangent: arc_tangent(origin, target, cos_omega),
        omega,
        intervals: sample_count.clamp(1, MAX_ARC_SAMPLES),
    }
}

/// Direction of travel at `origin`, orthogonal to it.
fn arc_tangent(origin: Vec3, target: Vec3, cos_omega: f64) -> Vec3 {
    let toward = sub(target, scale(origin, cos_omega));
    let length = norm(toward);
    if length > ANTIPODAL_EPS {
        return scale(toward, 1.0 / length);
    }

    // Antipodal endpoints: every great circle through both works. Prefer the
    // meridian; at the poles fall back to the prime meridian plane.
    let north: Vec3 = [0.0, 0.0, 1.0];
    let candidate = sub(north, scale(origin, origin[2]));
    let length = norm(candidate);
    if length > ANTIPODAL_EPS {
        scale(candidate, 1.0 / length)
    } else {
        [1.0, 0.0, 0.0]
    }
}

impl GreatCircle {
    pub fn start(&self) -> GeoPoint {
        self.start
    }

    pub fn end(&self) -> GeoPoint {
        self.end
    }

    /// Angular separation of the endpoints in radians.
    pub fn angle_rad(&self) -> f64 {
        self.omega
    }

    pub fn is_degenerate(&self) -> bool {
        self.omega <= DEGENERATE_OMEGA
    }

    /// Number of points the arc yields.
    pub fn len(&self) -> usize {
        self.intervals + 1
    }

    /// Always false; an arc has at least its two endpoints.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Point at sample `index` (0 = start, `len() - 1` = end).
    pub fn point_at(&self, index: usize) -> Option<GeoPoint> {
        if index > self.intervals {
            return None;
        }
        if index == 0 {
            return Some(self.start);
        }
        if index == self.intervals {
            return Some(self.end);
        }

        let t = index as f64 / self.intervals as f64;
        let theta = t * self.omega;
        let v = add(scale(self.origin, theta.cos()), scale(self.tangent, theta.sin()));
        Some(from_vector(v))
    }

    pub fn iter(&self) -> GreatCirclePoints {
        GreatCirclePoints {
            arc: *self,
            front: 0,
            back: self.len(),
        }
    }

    pub fn to_vec(&self) -> Vec<GeoPoint> {
        self.iter().collect()
    }
}

/// Iterator over the samples of a [`GreatCircle`].
#[derive(Debug, Clone)]
pub struct GreatCirclePoints {
    arc: GreatCircle,
    front: usize,
    back: usize,
}

impl Iterator for GreatCirclePoints {
    type Item = GeoPoint;

    fn next(&mut self) -> Option<GeoPoint> {
        if self.front >= self.back {
            return None;
        }
        let point = self.arc.point_at(self.front);
        self.front += 1;
        point
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for GreatCirclePoints {
    fn next_back(&mut self) -> Option<GeoPoint> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.arc.point_at(self.back)
    }
}

impl ExactSizeIterator for GreatCirclePoints {}

impl FusedIterator for GreatCirclePoints {}

impl IntoIterator for GreatCircle {
    type Item = GeoPoint;
    type IntoIter = GreatCirclePoints;

    fn into_iter(self) -> GreatCirclePoints {
        self.iter()
    }
}

impl IntoIterator for &GreatCircle {
    type Item = GeoPoint;
    type IntoIter = GreatCirclePoints;

    fn into_iter(self) -> GreatCirclePoints {
        self.iter()
    }
}

/// Split a path wherever consecutive points jump more than 180° in longitude.
///
/// The segment before the jump ends at the last point before it; the next
/// segment starts at the point after it. Points are never duplicated or
/// synthesised. Segments shorter than two points are dropped.
pub fn split_at_antimeridian<I>(points: I) -> Vec<Vec<GeoPoint>>
where
    I: IntoIterator<Item = GeoPoint>,
{
    let mut segments = Vec::new();
    let mut current: Vec<GeoPoint> = Vec::new();

    for point in points {
        if let Some(prev) = current.last() {
            if (point.lon - prev.lon).abs() > 180.0 {
                segments.push(std::mem::take(&mut current));
            }
        }
        current.push(point);
    }
    if !current.is_empty() {
        segments.push(current);
    }

    segments.retain(|segment| segment.len() >= 2);
    segments
}

/// Central angle to a nautical-mile arc length on the reference sphere.
pub fn arc_length_nm(arc: &GreatCircle) -> f64 {
    arc.angle_rad() * crate::spatial::EARTH_RADIUS_NM
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::haversine_nm;

    fn close(a: GeoPoint, b: GeoPoint) -> bool {
        (a.lat - b.lat).abs() < 1e-6 && (a.lon - b.lon).abs() < 1e-6
    }

    #[test]
    fn yields_sample_count_plus_one_points() {
        let start = GeoPoint::new(40.6398, -73.7789);
        let end = GeoPoint::new(51.4700, -0.4543);
        let arc = build_great_circle(start, end, 64);

        let points = arc.to_vec();
        assert_eq!(points.len(), 65);
        assert_eq!(arc.iter().len(), 65);
        assert!(close(points[0], start));
        assert!(close(points[64], end));
    }

    #[test]
    fn identical_points_give_degenerate_path() {
        let p = GeoPoint::new(33.9425, -118.4081);
        for n in [1, 8, 500] {
            let arc = build_great_circle(p, p, n);
            assert!(arc.is_degenerate());
            assert_eq!(arc.to_vec(), vec![p, p]);
        }
    }

    #[test]
    fn zero_samples_clamped_to_one() {
        let arc = build_great_circle(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 10.0), 0);
        assert_eq!(arc.len(), 2);
    }

    #[test]
    fn oversized_sample_count_is_capped() {
        let arc = build_great_circle(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 10.0), 1_000_000);
        assert_eq!(arc.len(), MAX_ARC_SAMPLES + 1);
    }

    #[test]
    fn samples_are_evenly_spaced_along_arc() {
        let start = GeoPoint::new(10.0, 20.0);
        let end = GeoPoint::new(-35.0, 150.0);
        let points = build_great_circle(start, end, 16).to_vec();
        let step = haversine_nm(points[0], points[1]);
        for pair in points.windows(2) {
            assert!((haversine_nm(pair[0], pair[1]) - step).abs() < 1e-6);
        }
        let total: f64 = points.windows(2).map(|w| haversine_nm(w[0], w[1])).sum();
        assert!((total - haversine_nm(start, end)).abs() < 1e-6);
    }

    #[test]
    fn equator_midpoint() {
        let arc = build_great_circle(GeoPoint::new(0.0, -10.0), GeoPoint::new(0.0, 10.0), 2);
        let mid = arc.point_at(1).unwrap();
        assert!(close(mid, GeoPoint::new(0.0, 0.0)));
    }

    #[test]
    fn iteration_is_restartable_and_reversible() {
        let arc = build_great_circle(GeoPoint::new(0.0, 0.0), GeoPoint::new(45.0, 45.0), 8);
        let first: Vec<_> = arc.iter().collect();
        let second: Vec<_> = (&arc).into_iter().collect();
        assert_eq!(first, second);

        let mut reversed: Vec<_> = arc.iter().rev().collect();
        reversed.reverse();
        assert_eq!(first, reversed);
    }

    #[test]
    fn antipodal_points_still_produce_finite_path() {
        let start = GeoPoint::new(0.0, 0.0);
        let end = GeoPoint::new(0.0, -180.0);
        let points = build_great_circle(start, end, 4).to_vec();
        assert_eq!(points.len(), 5);
        assert!(points.iter().all(|p| p.lat.is_finite() && p.lon.is_finite()));
        // Meridian route passes over the north pole
        assert!(close(points[2], GeoPoint::new(90.0, points[2].lon)));
    }

    #[test]
    fn sampled_longitudes_are_normalized() {
        let arc = build_great_circle(GeoPoint::new(35.0, 170.0), GeoPoint::new(40.0, -170.0), 32);
        assert!(arc.iter().all(|p| (-180.0..180.0).contains(&p.lon)));
    }

    #[test]
    fn split_detects_wrap() {
        let path = vec![
            GeoPoint::new(0.0, 178.0),
            GeoPoint::new(0.0, 179.0),
            GeoPoint::new(0.0, -179.0),
            GeoPoint::new(0.0, -178.0),
        ];
        let segments = split_at_antimeridian(path);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].last().unwrap().lon, 179.0);
        assert_eq!(segments[1][0].lon, -179.0);
    }

    #[test]
    fn split_drops_single_point_segments() {
        let path = vec![
            GeoPoint::new(0.0, 179.5),
            GeoPoint::new(0.0, -179.5),
            GeoPoint::new(0.0, -179.0),
        ];
        let segments = split_at_antimeridian(path);
        assert_eq!(segments, vec![vec![GeoPoint::new(0.0, -179.5), GeoPoint::new(0.0, -179.0)]]);
    }

    #[test]
    fn split_empty_and_single() {
        assert!(split_at_antimeridian(Vec::new()).is_empty());
        assert!(split_at_antimeridian(vec![GeoPoint::new(1.0, 1.0)]).is_empty());
    }

    #[test]
    fn pacific_crossing_arc_splits_once() {
        // Tokyo Haneda -> San Francisco crosses the date line
        let arc = build_great_circle(GeoPoint::new(35.5494, 139.7798), GeoPoint::new(37.6213, -122.3790), 64);
        let segments = split_at_antimeridian(&arc);
        assert_eq!(segments.len(), 2);
        let total: usize = segments.iter().map(Vec::len).sum();
        assert_eq!(total, arc.len());
    }

    #[test]
    fn arc_length_matches_haversine() {
        let a = GeoPoint::new(40.6398, -73.7789);
        let b = GeoPoint::new(33.9425, -118.4081);
        let arc = build_great_circle(a, b, 4);
        assert!((arc_length_nm(&arc) - haversine_nm(a, b)).abs() < 1e-6);
    }
}
