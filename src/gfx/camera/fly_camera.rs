use std::time::Duration;

use cgmath::*;

use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform, OPENGL_TO_WGPU_MATRIX};
use crate::gfx::picking::Ray;

/// Camera-relative movement directions used for flying and keyboard nudges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraDirection {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl CameraDirection {
    pub const ALL: [CameraDirection; 6] = [
        CameraDirection::Forward,
        CameraDirection::Backward,
        CameraDirection::Left,
        CameraDirection::Right,
        CameraDirection::Up,
        CameraDirection::Down,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy)]
struct CameraPose {
    position: Vector3<f32>,
    look_direction: Vector3<f32>,
    up: Vector3<f32>,
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    from: CameraPose,
    to: CameraPose,
    elapsed: f32,
    duration: f32,
}

/// Free-flying perspective camera.
///
/// `look_direction` is not normalized: its length is the distance to the
/// point the camera looks at, which `look_at` and `zoom_extents` keep.
#[derive(Debug, Clone)]
pub struct FlyCamera {
    pub position: Vector3<f32>,
    pub look_direction: Vector3<f32>,
    pub up: Vector3<f32>,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub fly_speed: f32,
    width: f32,
    height: f32,
    default_pose: CameraPose,
    flying: [bool; 6],
    animation: Duration,
    transition: Option<Transition>,
}

impl Camera for FlyCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * self.projection_matrix() * self.view_matrix()
    }
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(
            Vector3::new(0.0, -10.0, 10.0),
            Vector3::new(0.0, 10.0, -10.0),
            Vector3::unit_z(),
        )
    }
}

impl FlyCamera {
    pub fn new(position: Vector3<f32>, look_direction: Vector3<f32>, up: Vector3<f32>) -> Self {
        Self {
            position,
            look_direction,
            up,
            fovy: Deg(45.0),
            znear: 0.01,
            zfar: 100_000.0,
            fly_speed: 2.0,
            width: 800.0,
            height: 600.0,
            default_pose: CameraPose {
                position,
                look_direction,
                up,
            },
            flying: [false; 6],
            animation: Duration::ZERO,
            transition: None,
        }
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.width = width.max(1) as f32;
        self.height = height.max(1) as f32;
    }

    pub fn viewport(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(Point3::from_vec(self.position), self.look_direction, self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        perspective(self.fovy, self.aspect(), self.znear, self.zfar)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_position: self.position.extend(1.0).into(),
            view_proj: convert_matrix4_to_array(self.build_view_projection_matrix()),
        }
    }

    /// Point the camera is looking at.
    pub fn target(&self) -> Vector3<f32> {
        self.position + self.look_direction
    }

    /// Unit vector for a camera-relative direction.
    pub fn direction(&self, direction: CameraDirection) -> Vector3<f32> {
        let forward = self.look_direction.normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward);

        match direction {
            CameraDirection::Forward => forward,
            CameraDirection::Backward => -forward,
            CameraDirection::Left => -right,
            CameraDirection::Right => right,
            CameraDirection::Up => up,
            CameraDirection::Down => -up,
        }
    }

    /// World ray through a screen position (pixels, origin top-left).
    pub fn screen_to_ray(&self, screen_pos: (f32, f32)) -> Ray {
        let ndc_x = (2.0 * screen_pos.0) / self.width - 1.0;
        let ndc_y = 1.0 - (2.0 * screen_pos.1) / self.height;

        let forward = self.look_direction.normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward);
        let tan = (Rad::from(self.fovy).0 * 0.5).tan();

        let direction = forward + right * (ndc_x * tan * self.aspect()) + up * (ndc_y * tan);
        Ray::new(self.position, direction)
    }

    /// Intersect the ray through a screen position with a plane.
    ///
    /// Returns `None` when the ray runs parallel to the plane.
    pub fn unproject(
        &self,
        screen_pos: (f32, f32),
        plane_point: Vector3<f32>,
        plane_normal: Vector3<f32>,
    ) -> Option<Vector3<f32>> {
        let ray = self.screen_to_ray(screen_pos);
        let denom = plane_normal.dot(ray.direction);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = plane_normal.dot(plane_point - ray.origin) / denom;
        Some(ray.point_at(t))
    }

    pub fn animation_duration(&self) -> Duration {
        self.animation
    }

    /// Duration of animated moves; zero makes every move immediate.
    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.animation = duration;
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Keep the look vector and move so that `target` is in its center.
    pub fn look_at(&mut self, target: Vector3<f32>) {
        let to = CameraPose {
            position: target - self.look_direction,
            look_direction: self.look_direction,
            up: self.up,
        };
        self.move_to(to);
    }

    /// Frame a sphere around `center` keeping the current view direction.
    pub fn zoom_extents(&mut self, center: Vector3<f32>, radius: f32) {
        let radius = if radius > f32::EPSILON { radius } else { 1.0 };
        let distance = radius / (Rad::from(self.fovy).0 * 0.5).sin();
        let look_direction = self.look_direction.normalize() * distance;

        let to = CameraPose {
            position: center - look_direction,
            look_direction,
            up: self.up,
        };
        self.move_to(to);
    }

    /// Snap back to the pose the camera was created with.
    pub fn reset(&mut self) {
        self.transition = None;
        self.flying = [false; 6];
        self.apply(self.default_pose);
    }

    pub fn start_fly(&mut self, direction: CameraDirection) {
        self.flying[direction.index()] = true;
    }

    pub fn stop_fly(&mut self, direction: CameraDirection) {
        self.flying[direction.index()] = false;
    }

    pub fn is_flying(&self) -> bool {
        self.flying.iter().any(|flag| *flag)
    }

    /// Advance animations and free flight.
    pub fn update(&mut self, dt: Duration) {
        let seconds = dt.as_secs_f32();

        if let Some(mut transition) = self.transition.take() {
            transition.elapsed += seconds;
            let k = (transition.elapsed / transition.duration).min(1.0);
            // smoothstep
            let k = k * k * (3.0 - 2.0 * k);
            self.position = transition.from.position.lerp(transition.to.position, k);
            self.look_direction = transition.from.look_direction.lerp(transition.to.look_direction, k);
            if transition.elapsed < transition.duration {
                self.transition = Some(transition);
            }
        }

        let velocity = CameraDirection::ALL
            .iter()
            .filter(|direction| self.flying[direction.index()])
            .fold(Vector3::zero(), |sum, direction| sum + self.direction(*direction));

        if velocity.magnitude2() > 0.0 {
            self.position += velocity.normalize() * self.fly_speed * seconds;
        }
    }

    fn move_to(&mut self, to: CameraPose) {
        if self.animation.is_zero() {
            self.transition = None;
            self.apply(to);
            return;
        }

        self.transition = Some(Transition {
            from: CameraPose {
                position: self.position,
                look_direction: self.look_direction,
                up: self.up,
            },
            to,
            elapsed: 0.0,
            duration: self.animation.as_secs_f32(),
        });
    }

    fn apply(&mut self, pose: CameraPose) {
        self.position = pose.position;
        self.look_direction = pose.look_direction;
        self.up = pose.up;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn looking_down_z() -> FlyCamera {
        FlyCamera::new(
            Vector3::new(0.0, 0.0, 50.0),
            Vector3::new(0.0, 0.0, -50.0),
            Vector3::unit_y(),
        )
    }

    #[test]
    fn test_center_ray_follows_look_direction() {
        let camera = looking_down_z();
        let ray = camera.screen_to_ray((400.0, 300.0));
        assert!((ray.direction - Vector3::new(0.0, 0.0, -1.0)).magnitude() < 1e-5);
        assert_eq!(ray.origin, camera.position);
    }

    #[test]
    fn test_unproject_onto_plane() {
        let camera = looking_down_z();
        let point = camera
            .unproject((400.0, 300.0), Vector3::new(0.0, 0.0, 10.0), Vector3::unit_z())
            .unwrap();
        assert!((point - Vector3::new(0.0, 0.0, 10.0)).magnitude() < 1e-4);

        // right half of the screen lands on +X
        let right = camera
            .unproject((700.0, 300.0), Vector3::zero(), Vector3::unit_z())
            .unwrap();
        assert!(right.x > 0.0);
        assert!(right.y.abs() < 1e-4);

        assert!(camera
            .unproject((400.0, 300.0), Vector3::zero(), Vector3::unit_x())
            .is_none());
    }

    #[test]
    fn test_directions_are_orthonormal() {
        let camera = looking_down_z();
        assert!((camera.direction(CameraDirection::Right) - Vector3::unit_x()).magnitude() < 1e-5);
        assert!((camera.direction(CameraDirection::Up) - Vector3::unit_y()).magnitude() < 1e-5);
        assert!((camera.direction(CameraDirection::Backward) - Vector3::unit_z()).magnitude() < 1e-5);
    }

    #[test]
    fn test_look_at_keeps_view_vector() {
        let mut camera = looking_down_z();
        camera.look_at(Vector3::new(5.0, 5.0, 0.0));
        assert_eq!(camera.target(), Vector3::new(5.0, 5.0, 0.0));
        assert_eq!(camera.look_direction, Vector3::new(0.0, 0.0, -50.0));
    }

    #[test]
    fn test_animated_move_finishes() {
        let mut camera = looking_down_z();
        camera.set_animation_duration(Duration::from_millis(200));
        camera.look_at(Vector3::new(10.0, 0.0, 0.0));
        assert!(camera.is_animating());
        assert_eq!(camera.position, Vector3::new(0.0, 0.0, 50.0));

        camera.update(Duration::from_millis(100));
        assert!(camera.is_animating());
        camera.update(Duration::from_millis(150));
        assert!(!camera.is_animating());
        assert!((camera.target() - Vector3::new(10.0, 0.0, 0.0)).magnitude() < 1e-4);
    }

    #[test]
    fn test_zoom_extents_frames_radius() {
        let mut camera = looking_down_z();
        camera.zoom_extents(Vector3::new(1.0, 2.0, 3.0), 10.0);
        assert!((camera.target() - Vector3::new(1.0, 2.0, 3.0)).magnitude() < 1e-4);
        let expected = 10.0 / (Rad::from(camera.fovy).0 * 0.5).sin();
        assert!((camera.look_direction.magnitude() - expected).abs() < 1e-3);
    }

    #[test]
    fn test_fly_moves_and_reset_restores() {
        let mut camera = looking_down_z();
        camera.fly_speed = 4.0;
        camera.start_fly(CameraDirection::Forward);
        camera.update(Duration::from_millis(500));
        assert!((camera.position.z - 48.0).abs() < 1e-4);

        camera.stop_fly(CameraDirection::Forward);
        assert!(!camera.is_flying());
        camera.reset();
        assert_eq!(camera.position, Vector3::new(0.0, 0.0, 50.0));
    }
}
