//! CPU-side scene geometry shared by the WebGL2 and wgpu renderers.
//!
//! Everything is emitted as an unindexed, flat-coloured triangle list in world
//! space. The scene is small enough that rebuilding the dynamic part every
//! frame is cheaper than managing per-object buffers.

use glam::{Quat, Vec3};

use crate::constants::*;
use crate::controller::XrController;
use crate::gesture::FingerName;
use crate::head::Head;
use crate::input::{InputHandler, XrInput};
use crate::joints::HandJoint;
use crate::pointer::PointerBeam;
use crate::pose::{Handedness, Pose};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

pub const SCENE_VERTEX_STRIDE: usize = std::mem::size_of::<SceneVertex>();

const AXIS_X_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const AXIS_Y_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
const AXIS_Z_COLOR: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
const SPHERE_SEGMENTS: u32 = 8;
const SPHERE_RINGS: u32 = 4;

/// What to include when building a frame.
#[derive(Clone, Copy, Debug)]
pub struct SceneOptions {
    /// Head model; off for views rendered from inside the head.
    pub head_model: bool,
    /// Per-joint axes and fingertip balls on tracked hands.
    pub joint_markers: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            head_model: true,
            joint_markers: true,
        }
    }
}

#[derive(Default)]
pub struct SceneBuilder {
    vertices: Vec<SceneVertex>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(n),
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn vertices(&self) -> &[SceneVertex] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<SceneVertex> {
        self.vertices
    }

    #[inline]
    pub fn push_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, color: [f32; 4]) {
        for p in [a, b, c] {
            self.vertices.push(SceneVertex {
                position: p.to_array(),
                color,
            });
        }
    }

    /// Quad from four corners in fan order.
    pub fn push_quad(&mut self, corners: [Vec3; 4], color: [f32; 4]) {
        let [a, b, c, d] = corners;
        self.push_triangle(a, b, c, color);
        self.push_triangle(a, c, d, color);
    }

    /// Oriented box with half extents `half` around `center`.
    pub fn push_box(&mut self, center: Vec3, rotation: Quat, half: Vec3, color: [f32; 4]) {
        let corner = |sx: f32, sy: f32, sz: f32| {
            center + rotation * Vec3::new(sx * half.x, sy * half.y, sz * half.z)
        };
        let faces = [
            [(1., -1., -1.), (1., 1., -1.), (1., 1., 1.), (1., -1., 1.)],
            [(-1., -1., 1.), (-1., 1., 1.), (-1., 1., -1.), (-1., -1., -1.)],
            [(-1., 1., -1.), (-1., 1., 1.), (1., 1., 1.), (1., 1., -1.)],
            [(-1., -1., 1.), (-1., -1., -1.), (1., -1., -1.), (1., -1., 1.)],
            [(-1., -1., 1.), (1., -1., 1.), (1., 1., 1.), (-1., 1., 1.)],
            [(1., -1., -1.), (-1., -1., -1.), (-1., 1., -1.), (1., 1., -1.)],
        ];
        for face in faces {
            let q = face.map(|(x, y, z)| corner(x, y, z));
            self.push_quad(q, color);
        }
    }

    /// Ellipsoid around `center` with radii `radii` (local axes rotated by `rotation`).
    pub fn push_ellipsoid(&mut self, center: Vec3, rotation: Quat, radii: Vec3, color: [f32; 4]) {
        let point = |ring: u32, seg: u32| {
            let theta = std::f32::consts::PI * ring as f32 / SPHERE_RINGS as f32;
            let phi = std::f32::consts::TAU * seg as f32 / SPHERE_SEGMENTS as f32;
            let unit = Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
            center + rotation * (unit * radii)
        };
        for ring in 0..SPHERE_RINGS {
            for seg in 0..SPHERE_SEGMENTS {
                let a = point(ring, seg);
                let b = point(ring + 1, seg);
                let c = point(ring + 1, seg + 1);
                let d = point(ring, seg + 1);
                if ring > 0 {
                    self.push_triangle(a, d, c, color);
                }
                if ring + 1 < SPHERE_RINGS {
                    self.push_triangle(a, c, b, color);
                }
            }
        }
    }

    pub fn push_sphere(&mut self, center: Vec3, radius: f32, color: [f32; 4]) {
        self.push_ellipsoid(center, Quat::IDENTITY, Vec3::splat(radius), color);
    }

    /// Red/green/blue bars along the pose's X/Y/Z axes.
    pub fn push_axes(&mut self, pose: &Pose, size: f32) {
        let t = (size * 0.04).max(0.001);
        let axes = [
            (Vec3::X, Vec3::new(size / 2.0, t, t), AXIS_X_COLOR),
            (Vec3::Y, Vec3::new(t, size / 2.0, t), AXIS_Y_COLOR),
            (Vec3::Z, Vec3::new(t, t, size / 2.0), AXIS_Z_COLOR),
        ];
        for (dir, half, color) in axes {
            let center = pose.transform_point(dir * (size / 2.0));
            self.push_box(center, pose.rotation, half, color);
        }
    }

    /// Pointer beam quad, double sided.
    pub fn push_beam(&mut self, beam: &PointerBeam) {
        let [a, b, c, d] = beam.corners();
        self.push_quad([a, b, c, d], beam.color);
        self.push_quad([d, c, b, a], beam.color);
    }

    pub fn push_ground(&mut self) {
        let h = GROUND_SIZE / 2.0;
        let y = -0.001;
        self.push_quad(
            [
                Vec3::new(-h, y, h),
                Vec3::new(h, y, h),
                Vec3::new(h, y, -h),
                Vec3::new(-h, y, -h),
            ],
            GROUND_COLOR,
        );
    }

    /// Square grid on the floor, `GRID_DIVISIONS` cells across.
    pub fn push_grid(&mut self) {
        let h = GRID_SIZE / 2.0;
        let step = GRID_SIZE / GRID_DIVISIONS as f32;
        let w = 0.01;
        let y = 0.001;
        for i in 0..=GRID_DIVISIONS {
            let k = -h + step * i as f32;
            let color = if i * 2 == GRID_DIVISIONS {
                GRID_CENTER_COLOR
            } else {
                GRID_COLOR
            };
            self.push_quad(
                [
                    Vec3::new(k - w, y, h),
                    Vec3::new(k + w, y, h),
                    Vec3::new(k + w, y, -h),
                    Vec3::new(k - w, y, -h),
                ],
                color,
            );
            self.push_quad(
                [
                    Vec3::new(-h, y, k + w),
                    Vec3::new(h, y, k + w),
                    Vec3::new(h, y, k - w),
                    Vec3::new(-h, y, k - w),
                ],
                color,
            );
        }
    }

    /// Ground, grid and world axes.
    pub fn push_static(&mut self) {
        self.push_ground();
        self.push_grid();
        self.push_axes(&Pose::IDENTITY, WORLD_AXES_SIZE);
    }

    /// Magenta head with a white nose, plus its axes.
    pub fn push_head(&mut self, head: &Head) {
        let pose = head.pose();
        self.push_ellipsoid(
            pose.position,
            pose.rotation,
            Vec3::new(HEAD_RADIUS, HEAD_RADIUS * 1.25, HEAD_RADIUS),
            HEAD_COLOR,
        );
        self.push_sphere(
            pose.transform_point(Vec3::new(0.0, 0.0, -HEAD_RADIUS)),
            NOSE_RADIUS,
            NOSE_COLOR,
        );
        self.push_axes(&pose, HEAD_AXIS_SIZE);
    }

    fn push_handler(&mut self, handler: &InputHandler, options: &SceneOptions) {
        match handler {
            InputHandler::Hand(hand) => {
                let gesture = hand.gesture();
                if options.joint_markers {
                    self.push_joint_axes(hand.joints().iter());
                    for finger in FingerName::ALL {
                        let f = gesture.finger(finger);
                        if f.tracked {
                            let color = if f.pointing {
                                POINTING_COLOR
                            } else {
                                NOT_POINTING_COLOR
                            };
                            self.push_sphere(f.tip, FINGER_BALL_RADIUS, color);
                        }
                    }
                }
                self.push_sphere(
                    hand.wrist_world().position,
                    WRIST_BALL_RADIUS,
                    gesture.palm_facing.debug_color(),
                );
            }
            InputHandler::Mechanical(m) => {
                let grip = m.grip();
                self.push_box(
                    grip.position,
                    grip.rotation,
                    Vec3::new(0.02, 0.04, 0.06),
                    GRIP_COLOR,
                );
                self.push_axes(&grip, GRIP_AXIS_SIZE);
            }
        }
    }

    /// Per-joint axes for a tracked hand, from the raw joint poses.
    pub fn push_joint_axes(&mut self, joints: impl IntoIterator<Item = (HandJoint, Pose)>) {
        for (_, pose) in joints {
            self.push_axes(&pose, JOINT_AXIS_SIZE);
        }
    }

    /// All dynamic geometry for the current input state.
    pub fn push_input(&mut self, input: &XrInput, options: &SceneOptions) {
        if options.head_model {
            self.push_head(input.head());
        }
        for hand in [Handedness::Left, Handedness::Right] {
            if let Some(h) = input.handler(hand) {
                self.push_handler(h, options);
            }
            let axis = input.wrist_axis(hand);
            if axis.attached {
                self.push_axes(&axis.pose, WRIST_AXIS_SIZE);
            }
            let beam = input.pointer(hand);
            if beam.visible {
                self.push_beam(beam);
            }
        }
    }
}

/// Static scene plus everything driven by `input`.
pub fn build_frame(input: &XrInput, options: &SceneOptions) -> Vec<SceneVertex> {
    let mut builder = SceneBuilder::with_capacity(8192);
    builder.push_static();
    builder.push_input(input, options);
    builder.into_vertices()
}
