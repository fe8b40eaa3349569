//! View state shared by the web and native renderers.
//!
//! Nothing here touches a platform API. The desktop spectator view and the
//! native simulator build a [`Camera`]; XR views hand their own matrices
//! straight to [`ViewUniform`].

use glam::{Mat4, Vec3};

use crate::constants::{SPECTATOR_EYE, SPECTATOR_FOVY_DEG, SPECTATOR_ZFAR, SPECTATOR_ZNEAR};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Third-person view of the play area, looking at the origin.
    pub fn spectator(aspect: f32) -> Self {
        Self {
            eye: Vec3::from(SPECTATOR_EYE),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: SPECTATOR_FOVY_DEG.to_radians(),
            znear: SPECTATOR_ZNEAR,
            zfar: SPECTATOR_ZFAR,
        }
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Per-view uniform block: one column-major view-projection matrix.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ViewUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl ViewUniform {
    pub fn new(view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
        }
    }
}

impl From<&Camera> for ViewUniform {
    fn from(camera: &Camera) -> Self {
        Self::new(camera.view_proj())
    }
}
