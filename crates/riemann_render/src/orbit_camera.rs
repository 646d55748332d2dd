//! Perspective camera orbiting a target point
//!
//! The eye sits on a sphere around the target, described by distance,
//! yaw (about world +Y), and pitch (elevation). World +Y is up.

use riemann_input::OrbitControl;
use riemann_math::{mat4, Mat4, Vec3};

/// Keep pitch away from the poles so the up vector stays well defined
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Orbit camera
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    distance: f32,
    yaw: f32,
    pitch: f32,

    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub min_distance: f32,
    pub max_distance: f32,

    home_target: Vec3,
    home_eye: Vec3,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(Vec3::new(-8.0, 2.0, 8.0), Vec3::ZERO)
    }
}

impl OrbitCamera {
    /// Camera at `eye` looking at `target`
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        let mut camera = Self {
            target,
            distance: 1.0,
            yaw: 0.0,
            pitch: 0.0,
            fov_y: 70.0f32.to_radians(),
            near: 1.0,
            far: 1000.0,
            min_distance: 0.5,
            max_distance: 500.0,
            home_target: target,
            home_eye: eye,
        };
        camera.look_from(eye);
        camera
    }

    /// Builder: set the projection (fov in degrees)
    pub fn with_projection(mut self, fov_deg: f32, near: f32, far: f32) -> Self {
        self.fov_y = fov_deg.to_radians();
        self.near = near;
        self.far = far;
        self
    }

    /// Builder: set the dolly range
    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max.max(min);
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
        self
    }

    /// Place the eye at `eye`, keeping the current target
    fn look_from(&mut self, eye: Vec3) {
        let offset = eye - self.target;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return;
        }
        self.distance = distance;
        self.yaw = offset.x.atan2(offset.z);
        self.pitch = (offset.y / distance).asin().clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Eye position in world space
    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target
            + Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * self.distance
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Unit vector from eye to target
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye()).normalized()
    }

    /// Screen-right direction in world space
    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalized()
    }

    /// Screen-up direction in world space
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    pub fn view_matrix(&self) -> Mat4 {
        mat4::look_at(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        mat4::perspective(self.fov_y, aspect, self.near, self.far)
    }

    /// Combined projection * view
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        mat4::mul(self.projection_matrix(aspect), self.view_matrix())
    }

    /// Return to the starting eye and target
    pub fn reset(&mut self) {
        self.target = self.home_target;
        self.look_from(self.home_eye);
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
    }

    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw = (self.yaw + delta_yaw).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + delta_pitch).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Drag the target so the scene follows the cursor
    pub fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        // World units per pixel at the target's depth
        let scale = 2.0 * self.distance * (self.fov_y / 2.0).tan() / viewport_height.max(1.0);
        self.target = self.target - self.right() * (dx * scale) + self.up() * (dy * scale);
    }

    pub fn dolly(&mut self, scale: f32) {
        if scale.is_finite() && scale > 0.0 {
            self.distance = (self.distance * scale).clamp(self.min_distance, self.max_distance);
        }
    }
}

impl OrbitControl for OrbitCamera {
    fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        OrbitCamera::rotate(self, delta_yaw, delta_pitch);
    }

    fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        OrbitCamera::pan(self, dx, dy, viewport_height);
    }

    fn dolly(&mut self, scale: f32) {
        OrbitCamera::dolly(self, scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_vec(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_default_eye_position() {
        let cam = OrbitCamera::default();
        assert!(approx_vec(cam.eye(), Vec3::new(-8.0, 2.0, 8.0)));
        assert!((cam.distance() - 132.0f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_forward_points_at_target() {
        let cam = OrbitCamera::default();
        let expected = (Vec3::ZERO - Vec3::new(-8.0, 2.0, 8.0)).normalized();
        assert!(approx_vec(cam.forward(), expected));
        assert!(cam.up().y > 0.0);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut cam = OrbitCamera::default();
        cam.rotate(0.0, 10.0);
        assert!(cam.eye().y < cam.distance());
        assert!(cam.up().length() > 0.99);
    }

    #[test]
    fn test_rotate_keeps_distance() {
        let mut cam = OrbitCamera::default();
        let d = cam.distance();
        cam.rotate(1.0, 0.3);
        assert!(((cam.eye() - cam.target).length() - d).abs() < 1e-4);
    }

    #[test]
    fn test_dolly_clamped() {
        let mut cam = OrbitCamera::default().with_distance_limits(2.0, 20.0);
        cam.dolly(0.01);
        assert_eq!(cam.distance(), 2.0);
        cam.dolly(1000.0);
        assert_eq!(cam.distance(), 20.0);
        cam.dolly(-1.0);
        assert_eq!(cam.distance(), 20.0);
    }

    #[test]
    fn test_pan_moves_target_in_view_plane() {
        let mut cam = OrbitCamera::default();
        let forward = cam.forward();
        cam.pan(100.0, 0.0, 600.0);
        assert!(cam.target.x != 0.0 || cam.target.z != 0.0);
        assert!(cam.target.dot(forward).abs() < 1e-4);
    }

    #[test]
    fn test_reset_restores_home() {
        let mut cam = OrbitCamera::default();
        cam.rotate(2.0, -0.5);
        cam.pan(50.0, 50.0, 600.0);
        cam.dolly(0.5);
        cam.reset();
        assert!(approx_vec(cam.eye(), Vec3::new(-8.0, 2.0, 8.0)));
        assert!(approx_vec(cam.target, Vec3::ZERO));
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let cam = OrbitCamera::default();
        let clip = mat4::transform_point(cam.view_proj(16.0 / 9.0), Vec3::ZERO);
        assert!(clip[3] > 0.0);
        assert!((clip[0] / clip[3]).abs() < 1e-5);
        assert!((clip[1] / clip[3]).abs() < 1e-5);
        let depth = clip[2] / clip[3];
        assert!((0.0..=1.0).contains(&depth));
    }
}
