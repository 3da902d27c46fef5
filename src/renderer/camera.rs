use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

pub const ORBIT_RADIUS: f32 = 15.0;
pub const ORBIT_HEIGHT: f32 = 10.0;
pub const ORBIT_TARGET: Vec3 = Vec3::new(0.0, 3.0, 0.0);
pub const FOV_Y_DEGREES: f32 = 45.0;
pub const Z_NEAR: f32 = 0.01;
pub const Z_FAR: f32 = 100.0;
pub const DEFAULT_ORBIT_STEP: f32 = 0.001;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable, Debug, PartialEq)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub const SIZE: wgpu::BufferAddress = std::mem::size_of::<CameraUniform>() as wgpu::BufferAddress;

    /// `view_proj` is glam's `projection * view`; stored column-major this is
    /// the transpose of the row-vector `view × projection` product.
    pub fn from_matrix(view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
        }
    }
}

/// Which ratio feeds the projection. `HeightOverWidth` divides height by
/// width, matching older builds of the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectMode {
    #[default]
    WidthOverHeight,
    HeightOverWidth,
}

impl AspectMode {
    pub fn aspect(self, width: u32, height: u32) -> f32 {
        let width = width.max(1) as f32;
        let height = height.max(1) as f32;
        match self {
            AspectMode::WidthOverHeight => width / height,
            AspectMode::HeightOverWidth => height / width,
        }
    }
}

/// Camera circling the origin at a fixed radius and height, always looking
/// at `ORBIT_TARGET`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    angle: f32,
    step: f32,
    aspect_mode: AspectMode,
}

impl OrbitCamera {
    pub fn new(step: f32, aspect_mode: AspectMode) -> Self {
        Self {
            angle: 0.0,
            step,
            aspect_mode,
        }
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }

    /// Advances by one fixed step. Speed is tied to frame rate.
    pub fn advance(&mut self) -> f32 {
        self.angle += self.step;
        self.angle
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(
            -ORBIT_RADIUS * self.angle.cos(),
            ORBIT_HEIGHT,
            -ORBIT_RADIUS * self.angle.sin(),
        )
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_lh(self.eye(), ORBIT_TARGET, Vec3::Y)
    }

    pub fn proj(&self, width: u32, height: u32) -> Mat4 {
        Mat4::perspective_lh(
            FOV_Y_DEGREES.to_radians(),
            self.aspect_mode.aspect(width, height),
            Z_NEAR,
            Z_FAR,
        )
    }

    pub fn view_proj(&self, width: u32, height: u32) -> Mat4 {
        self.proj(width, height) * self.view()
    }

    pub fn uniform(&self, width: u32, height: u32) -> CameraUniform {
        CameraUniform::from_matrix(self.view_proj(width, height))
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(DEFAULT_ORBIT_STEP, AspectMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_uniform_is_64_bytes() {
        // mat4x4<f32> = 16 * 4 bytes
        assert_eq!(std::mem::size_of::<CameraUniform>(), 64);
        assert_eq!(CameraUniform::SIZE, 64);
    }

    #[test]
    fn advance_adds_one_step_before_use() {
        let mut camera = OrbitCamera::new(0.25, AspectMode::WidthOverHeight);
        assert_eq!(camera.advance(), 0.25);
        assert_eq!(camera.advance(), 0.5);
        assert_eq!(camera.angle(), 0.5);
    }

    #[test]
    fn eye_at_zero_angle() {
        let camera = OrbitCamera::default();
        assert!((camera.eye() - Vec3::new(-15.0, 10.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn eye_stays_on_orbit_circle() {
        for i in 0..16 {
            let camera = OrbitCamera::default().with_angle(i as f32 * 0.4);
            let eye = camera.eye();
            assert_eq!(eye.y, ORBIT_HEIGHT);
            assert!((eye.x.hypot(eye.z) - ORBIT_RADIUS).abs() < 1e-4);
        }
    }

    #[test]
    fn aspect_modes() {
        assert_eq!(AspectMode::WidthOverHeight.aspect(1600, 800), 2.0);
        assert_eq!(AspectMode::HeightOverWidth.aspect(1600, 800), 0.5);
        assert_eq!(AspectMode::WidthOverHeight.aspect(100, 0), 100.0);
    }

    #[test]
    fn independent_cameras_do_not_share_angle() {
        let mut a = OrbitCamera::default();
        let b = OrbitCamera::default();
        a.advance();
        assert_ne!(a.angle(), b.angle());
    }
}
