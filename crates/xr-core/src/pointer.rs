//! A flat "ray" drawn from one world point to another, used for the debug
//! pointer of each hand.

use glam::{Mat3, Mat4, Quat, Vec3};

use crate::constants::{POINTER_ACTIVE_COLOR, POINTER_DEFAULT_LENGTH, POINTER_WIDTH};

/// Rotation whose +Z axis points along `dir`, keeping +Y as close to `up` as
/// possible. A zero `dir` yields the identity.
pub fn look_rotation(dir: Vec3, up: Vec3) -> Quat {
    let z = dir.normalize_or_zero();
    if z == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let mut x = up.cross(z);
    if x.length_squared() < 1e-12 {
        // up and dir are parallel; nudge so the basis stays well defined
        let nudged = if z.x.abs() < 0.9 {
            Vec3::new(z.x + 1e-4, z.y, z.z)
        } else {
            Vec3::new(z.x, z.y, z.z + 1e-4)
        }
        .normalize();
        x = up.cross(nudged);
    }
    let x = x.normalize();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}

/// Unit beam geometry: a 1 × `POINTER_WIDTH` quad along local Z, stretched to
/// the beam length through `scale_z`.
#[derive(Clone, Debug)]
pub struct PointerBeam {
    origin: Vec3,
    target: Vec3,
    position: Vec3,
    rotation: Quat,
    scale_z: f32,
    pub visible: bool,
    pub color: [f32; 4],
}

impl Default for PointerBeam {
    fn default() -> Self {
        Self::new(POINTER_ACTIVE_COLOR)
    }
}

impl PointerBeam {
    pub fn new(color: [f32; 4]) -> Self {
        Self {
            origin: Vec3::ZERO,
            target: Vec3::ZERO,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale_z: 0.0,
            visible: false,
            color,
        }
    }

    pub fn set_from_to(&mut self, from: Vec3, to: Vec3) {
        self.origin = from;
        self.target = to;
        self.reposition();
    }

    /// Beam from `from` along `dir` for `distance` (default 1.0).
    pub fn set_from_dir(&mut self, from: Vec3, dir: Vec3, distance: Option<f32>) {
        let distance = distance.unwrap_or(POINTER_DEFAULT_LENGTH);
        self.origin = from;
        self.target = from + dir.normalize_or_zero() * distance;
        self.reposition();
    }

    fn reposition(&mut self) {
        self.scale_z = self.origin.distance(self.target);
        self.position = (self.origin + self.target) / 2.0;
        self.rotation = look_rotation(self.target - self.position, Vec3::Y);
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Midpoint of the beam.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Beam length.
    pub fn length(&self) -> f32 {
        self.scale_z
    }

    /// World direction the beam faces (+Z of its rotation).
    pub fn facing(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::new(1.0, 1.0, self.scale_z),
            self.rotation,
            self.position,
        )
    }

    /// World-space corners of the beam quad, in triangle-fan order.
    pub fn corners(&self) -> [Vec3; 4] {
        let m = self.model_matrix();
        let h = POINTER_WIDTH / 2.0;
        [
            m.transform_point3(Vec3::new(0.0, -h, -0.5)),
            m.transform_point3(Vec3::new(0.0, -h, 0.5)),
            m.transform_point3(Vec3::new(0.0, h, 0.5)),
            m.transform_point3(Vec3::new(0.0, h, -0.5)),
        ]
    }
}
