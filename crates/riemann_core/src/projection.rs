//! Mapping samples to line segments
//!
//! The sphere has radius 1 and centre `(0, 0, 1)`: it rests on the plot
//! plane at the origin and its north pole is `(0, 0, 2)`. Every plane point
//! is joined to the north pole by a projection ray; the ray pierces the
//! sphere at the point's stereographic image.

use riemann_math::Vec3;

use crate::{Color, Sample, Segment};

/// Centre of the Riemann sphere
pub const SPHERE_CENTER: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Radius of the Riemann sphere
pub const SPHERE_RADIUS: f32 = 1.0;

/// Projection point at the top of the sphere
pub const NORTH_POLE: Vec3 = Vec3::new(0.0, 0.0, 2.0);

/// Height of the ray's plane end, lifted so rays stay visible over the axes
pub const RAY_PLANE_Z: f32 = 0.1;

/// A sample placed on the plane at height `z`
#[inline]
pub fn plane_point(sample: Sample, z: f32) -> Vec3 {
    Vec3::new(sample.x as f32, sample.y as f32, z)
}

/// Connect consecutive samples of each run
pub fn curve_segments(runs: &[Vec<Sample>], z: f32, color: Color) -> Vec<Segment> {
    let count = runs.iter().map(|r| r.len().saturating_sub(1)).sum();
    let mut segments = Vec::with_capacity(count);
    for run in runs {
        segments.extend(run.windows(2).map(|pair| {
            Segment::new(plane_point(pair[0], z), plane_point(pair[1], z), color)
        }));
    }
    segments
}

/// Ray from a sample (lifted to `plane_z`) to the north pole
#[inline]
pub fn projection_ray(sample: Sample, plane_z: f32, color: Color) -> Segment {
    Segment::new(plane_point(sample, plane_z), NORTH_POLE, color)
}

/// Rays for every finite sample
pub fn projection_rays(samples: &[Sample], plane_z: f32, color: Color) -> Vec<Segment> {
    samples
        .iter()
        .filter(|s| s.is_finite())
        .map(|&s| projection_ray(s, plane_z, color))
        .collect()
}

/// Stereographic image of the plane point `(x, y, 0)` on the sphere
///
/// With `t = 4 / (x² + y² + 4)` the image is `(t·x, t·y, 2 − 2t)`.
/// The origin maps to the south pole and far points approach the north pole.
pub fn stereographic(x: f64, y: f64) -> Vec3 {
    let t = 4.0 / (x * x + y * y + 4.0);
    Vec3::new((t * x) as f32, (t * y) as f32, (2.0 - 2.0 * t) as f32)
}

/// Image of each run on the sphere
pub fn sphere_trace(runs: &[Vec<Sample>], color: Color) -> Vec<Segment> {
    let mut segments = Vec::new();
    for run in runs {
        segments.extend(run.windows(2).map(|pair| {
            Segment::new(
                stereographic(pair[0].x, pair[0].y),
                stereographic(pair[1].x, pair[1].y),
                color,
            )
        }));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_curve_segments_connect_neighbors() {
        let runs = vec![
            vec![Sample::new(1.0, 1.0), Sample::new(2.0, 0.5), Sample::new(4.0, 0.25)],
            vec![Sample::new(-2.0, -0.5), Sample::new(-1.0, -1.0)],
        ];
        let segments = curve_segments(&runs, 0.0, Color::WHITE);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].a, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(segments[0].b, Vec3::new(2.0, 0.5, 0.0));
        assert_eq!(segments[1].b, Vec3::new(4.0, 0.25, 0.0));
        // No segment bridges the two runs
        assert_eq!(segments[2].a, Vec3::new(-2.0, -0.5, 0.0));
    }

    #[test]
    fn test_ray_ends_at_north_pole() {
        let ray = projection_ray(Sample::new(3.0, -2.0), RAY_PLANE_Z, Color::WHITE);
        assert_eq!(ray.a, Vec3::new(3.0, -2.0, 0.1));
        assert_eq!(ray.b, Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_rays_skip_non_finite() {
        let samples = [
            Sample::new(1.0, 1.0),
            Sample::new(2.0, f64::NAN),
            Sample::new(3.0, 3.0),
        ];
        assert_eq!(projection_rays(&samples, RAY_PLANE_Z, Color::WHITE).len(), 2);
    }

    #[test]
    fn test_rays_skip_values_beyond_f32() {
        let samples = [Sample::new(1.0, 1e40), Sample::new(2.0, -1e300)];
        assert!(projection_rays(&samples, RAY_PLANE_Z, Color::WHITE).is_empty());
    }

    #[test]
    fn test_stereographic_on_sphere() {
        for &(x, y) in &[(0.0, 0.0), (1.0, 0.0), (-3.0, 2.0), (100.0, -50.0)] {
            let p = stereographic(x, y);
            assert!(
                approx((p - SPHERE_CENTER).length(), SPHERE_RADIUS),
                "({}, {}) mapped off the sphere",
                x,
                y
            );
        }
    }

    #[test]
    fn test_stereographic_landmarks() {
        assert_eq!(stereographic(0.0, 0.0), Vec3::ZERO);

        // The circle of radius 2 lands on the equator
        let p = stereographic(2.0, 0.0);
        assert!(approx(p.x, 1.0));
        assert!(approx(p.z, 1.0));

        let far = stereographic(1e6, 0.0);
        assert!(approx(far.z, 2.0));
    }

    #[test]
    fn test_stereographic_lies_on_ray() {
        let (x, y) = (3.0, 1.5);
        let p = stereographic(x, y);
        let plane = Vec3::new(x as f32, y as f32, 0.0);
        let dir = (plane - NORTH_POLE).normalized();
        let to_p = (p - NORTH_POLE).normalized();
        assert!(approx(dir.dot(to_p), 1.0));
    }

    #[test]
    fn test_sphere_trace_count() {
        let runs = vec![vec![Sample::new(1.0, 1.0), Sample::new(2.0, 0.5)]];
        let trace = sphere_trace(&runs, Color::WHITE);
        assert_eq!(trace.len(), 1);
        assert!(trace[0].a.z > 0.0 && trace[0].a.z < 2.0);
    }
}
