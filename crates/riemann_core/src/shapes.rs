//! Static scene geometry: wireframe sphere and axis lines

use std::f32::consts::PI;

use riemann_math::Vec3;

use crate::{Color, Segment};

/// Longitude/latitude divisions of the wireframe sphere
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SphereDivisions {
    pub longitudes: u32,
    pub latitudes: u32,
}

impl Default for SphereDivisions {
    fn default() -> Self {
        Self {
            longitudes: 32,
            latitudes: 16,
        }
    }
}

/// Wireframe sphere with its poles on the Z axis
///
/// Emits every latitude ring (poles excluded) and every meridian.
/// Segment count is `longitudes * (latitudes - 1) + longitudes * latitudes`.
pub fn wireframe_sphere(
    center: Vec3,
    radius: f32,
    divisions: SphereDivisions,
    color: Color,
) -> Vec<Segment> {
    let n_lon = divisions.longitudes.max(3);
    let n_lat = divisions.latitudes.max(2);

    let point = |lat: u32, lon: u32| {
        let theta = PI * lat as f32 / n_lat as f32;
        let phi = 2.0 * PI * (lon % n_lon) as f32 / n_lon as f32;
        let (sin_t, cos_t) = theta.sin_cos();
        let (sin_p, cos_p) = phi.sin_cos();
        center + Vec3::new(sin_t * cos_p, sin_t * sin_p, cos_t) * radius
    };

    let mut segments = Vec::with_capacity((n_lon * (2 * n_lat - 1)) as usize);

    // Latitude rings
    for lat in 1..n_lat {
        for lon in 0..n_lon {
            segments.push(Segment::new(point(lat, lon), point(lat, lon + 1), color));
        }
    }

    // Meridians, pole to pole
    for lon in 0..n_lon {
        for lat in 0..n_lat {
            segments.push(Segment::new(point(lat, lon), point(lat + 1, lon), color));
        }
    }

    segments
}

/// The X and Y axes on the plot plane, each `2 * half_length` long
pub fn axis_lines(half_length: f32, color: Color) -> [Segment; 2] {
    [
        Segment::new(
            Vec3::new(-half_length, 0.0, 0.0),
            Vec3::new(half_length, 0.0, 0.0),
            color,
        ),
        Segment::new(
            Vec3::new(0.0, -half_length, 0.0),
            Vec3::new(0.0, half_length, 0.0),
            color,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_segment_count() {
        let segments = wireframe_sphere(Vec3::ZERO, 1.0, SphereDivisions::default(), Color::WHITE);
        // 32 * 15 ring segments + 32 * 16 meridian segments
        assert_eq!(segments.len(), 32 * 15 + 32 * 16);
    }

    #[test]
    fn test_sphere_points_on_surface() {
        let center = Vec3::new(0.0, 0.0, 1.0);
        let segments = wireframe_sphere(center, 1.0, SphereDivisions::default(), Color::WHITE);
        for s in &segments {
            assert!(((s.a - center).length() - 1.0).abs() < 1e-5);
            assert!(((s.b - center).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_sphere_poles_on_z_axis() {
        let center = Vec3::new(0.0, 0.0, 1.0);
        let segments = wireframe_sphere(center, 1.0, SphereDivisions::default(), Color::WHITE);
        let top = segments.iter().map(|s| s.a.z.max(s.b.z)).fold(f32::MIN, f32::max);
        let bottom = segments.iter().map(|s| s.a.z.min(s.b.z)).fold(f32::MAX, f32::min);
        assert!((top - 2.0).abs() < 1e-5);
        assert!(bottom.abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_divisions_clamped() {
        let divisions = SphereDivisions { longitudes: 0, latitudes: 0 };
        let segments = wireframe_sphere(Vec3::ZERO, 1.0, divisions, Color::WHITE);
        // 3 longitudes, 1 ring, 2 bands per meridian
        assert_eq!(segments.len(), 3 + 3 * 2);
    }

    #[test]
    fn test_axis_lines() {
        let [x_axis, y_axis] = axis_lines(32.0, Color::BLACK);
        assert_eq!(x_axis.length(), 64.0);
        assert_eq!(y_axis.a, Vec3::new(0.0, -32.0, 0.0));
        assert_eq!(y_axis.color, Color::BLACK);
    }
}
