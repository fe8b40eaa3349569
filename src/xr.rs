//! WebXR session setup and per-frame reading of viewer and input poses.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Mat4;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;
use xr_core::{HandJoint, HandJoints, Handedness, HapticPulse, InputFrame, InputSnapshot, Pose};

use crate::constants::OPTIONAL_FEATURES;
use crate::convert::{self, RawButton};
use crate::events::{self, EventQueue};
use crate::frame::{self, FrameContext};
use crate::overlay::{self, VrButtonState};
use crate::render::Viewport;

pub struct XrState {
    pub session: web::XrSession,
    pub space: web::XrReferenceSpace,
    pub layer: web::XrWebGlLayer,
}

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

fn xr_system() -> Option<web::XrSystem> {
    let navigator = web::window()?.navigator();
    let has_xr = js_sys::Reflect::has(&navigator, &"xr".into()).unwrap_or(false);
    has_xr.then(|| navigator.xr())
}

pub async fn immersive_vr_supported() -> bool {
    let Some(xr) = xr_system() else {
        return false;
    };
    match JsFuture::from(xr.is_session_supported(web::XrSessionMode::ImmersiveVr)).await {
        Ok(v) => v.as_bool().unwrap_or(false),
        Err(e) => {
            log::warn!("[xr] isSessionSupported failed: {:?}", e);
            false
        }
    }
}

async fn request_space(session: &web::XrSession) -> anyhow::Result<web::XrReferenceSpace> {
    let floor = session.request_reference_space(web::XrReferenceSpaceType::LocalFloor);
    let space = match JsFuture::from(floor).await {
        Ok(s) => s,
        Err(e) => {
            log::warn!("[xr] local-floor unavailable ({:?}); using local", e);
            JsFuture::from(session.request_reference_space(web::XrReferenceSpaceType::Local))
                .await
                .map_err(js_err)?
        }
    };
    space.dyn_into().map_err(js_err)
}

/// Enter VR, or leave it if a session is already running.
pub async fn toggle_session(ctx: Rc<RefCell<FrameContext>>) -> anyhow::Result<()> {
    if let Some(state) = ctx.borrow().xr.as_ref() {
        _ = state.session.end();
        return Ok(());
    }

    let xr = xr_system().ok_or_else(|| anyhow::anyhow!("WebXR not available"))?;
    let init = web::XrSessionInit::new();
    let features = js_sys::Array::new();
    for f in OPTIONAL_FEATURES {
        features.push(&JsValue::from_str(f));
    }
    init.set_optional_features(&features);
    let session: web::XrSession = JsFuture::from(
        xr.request_session_with_options(web::XrSessionMode::ImmersiveVr, &init),
    )
    .await
    .map_err(js_err)?
    .dyn_into()
    .map_err(js_err)?;
    log::info!("[xr] session started");

    let (gl, queue, document) = {
        let c = ctx.borrow();
        (c.renderer.gl().clone(), c.events.clone(), c.document.clone())
    };
    let layer = web::XrWebGlLayer::new_with_web_gl2_rendering_context(&session, &gl)
        .map_err(js_err)?;
    let render_state = web::XrRenderStateInit::new();
    render_state.set_base_layer(Some(&layer));
    _ = session.update_render_state_with_state(&render_state);

    let space = request_space(&session).await?;
    events::wire_session_events(&session, &queue);

    ctx.borrow_mut().xr = Some(XrState {
        session: session.clone(),
        space,
        layer,
    });
    overlay::set_vr_button(&document, VrButtonState::Exit);
    frame::start_xr_loop(ctx, session);
    Ok(())
}

fn pose_of(transform: &web::XrRigidTransform) -> Pose {
    let p = transform.position();
    let o = transform.orientation();
    convert::pose_from_xyzw([p.x(), p.y(), p.z()], [o.x(), o.y(), o.z(), o.w()])
}

fn read_joints(frame: &web::XrFrame, hand: &web::XrHand, space: &web::XrSpace) -> HandJoints {
    let mut joints = HandJoints::new();
    for joint in HandJoint::ALL {
        let name = JsValue::from_str(joint.as_str());
        let Some(xr_joint) = web::XrHandJoint::from_js_value(&name) else {
            continue;
        };
        let joint_space = hand.get(xr_joint);
        if let Some(pose) = frame.get_joint_pose(&joint_space, space) {
            joints.set(joint, pose_of(&pose.transform()));
        }
    }
    joints
}

fn read_gamepad(gp: &web::Gamepad) -> xr_core::GamepadState {
    let axes: Vec<f64> = gp.axes().iter().filter_map(|a| a.as_f64()).collect();
    let buttons: Vec<RawButton> = gp
        .buttons()
        .iter()
        .filter_map(|b| b.dyn_into::<web::GamepadButton>().ok())
        .map(|b| (b.pressed(), b.touched(), b.value()))
        .collect();
    convert::gamepad_from_raw(&axes, &buttons, gp.haptic_actuators().length() > 0)
}

fn read_source(
    frame: &web::XrFrame,
    source: &web::XrInputSource,
    space: &web::XrSpace,
) -> InputSnapshot {
    let mut snapshot = InputSnapshot::default();
    if let Some(grip) = source.grip_space() {
        snapshot.grip = frame.get_pose(&grip, space).map(|p| pose_of(&p.transform()));
    }
    if let Some(hand) = source.hand() {
        snapshot.joints = read_joints(frame, &hand, space);
    }
    snapshot.gamepad = source.gamepad().map(|gp| read_gamepad(&gp));
    snapshot
}

fn input_sources(session: &web::XrSession) -> impl Iterator<Item = web::XrInputSource> {
    let sources = session.input_sources();
    (0..sources.length()).filter_map(move |i| sources.get(i))
}

/// Head and both hands as seen by this XR frame.
pub fn read_frame(frame: &web::XrFrame, state: &XrState, viewer: &web::XrViewerPose) -> InputFrame {
    let mut out = InputFrame {
        head: pose_of(&viewer.transform()),
        ..Default::default()
    };
    for source in input_sources(&state.session) {
        if let Some(hand) = events::handedness(&source) {
            *out.hand_mut(hand) = read_source(frame, &source, &state.space);
        }
    }
    out
}

/// Per-eye viewports and view-projection matrices.
pub fn views(state: &XrState, viewer: &web::XrViewerPose) -> Vec<(Viewport, Mat4)> {
    viewer
        .views()
        .iter()
        .filter_map(|v| v.dyn_into::<web::XrView>().ok())
        .filter_map(|view| {
            let vp = state.layer.get_viewport(&view)?;
            let proj = view.projection_matrix();
            let inv = view.transform().inverse().matrix();
            if proj.len() < 16 || inv.len() < 16 {
                return None;
            }
            let view_proj = Mat4::from_cols_slice(&proj) * Mat4::from_cols_slice(&inv);
            Some((
                Viewport {
                    x: vp.x(),
                    y: vp.y(),
                    width: vp.width(),
                    height: vp.height(),
                },
                view_proj,
            ))
        })
        .collect()
}

/// Forward queued pulses to the matching controller's first haptic actuator.
pub fn send_haptics(
    session: &web::XrSession,
    pulses: impl IntoIterator<Item = (Handedness, HapticPulse)>,
) {
    for (hand, pulse) in pulses {
        let actuator = input_sources(session)
            .filter(|s| events::handedness(s) == Some(hand))
            .find_map(|s| s.gamepad())
            .and_then(|gp| {
                gp.haptic_actuators()
                    .get(0)
                    .dyn_into::<web::GamepadHapticActuator>()
                    .ok()
            });
        let Some(actuator) = actuator else {
            log::debug!("[xr] no haptic actuator on {}", hand.as_str());
            continue;
        };
        let (value, duration) = convert::pulse_args(&pulse);
        if let Err(e) = actuator.pulse(value, duration) {
            log::debug!("[xr] haptic pulse failed: {:?}", e);
        }
    }
}

/// Keep frame state consistent after the session is gone.
pub fn session_ended(document: &web::Document) {
    log::info!("[xr] session ended");
    overlay::set_vr_button(document, VrButtonState::Enter);
}
