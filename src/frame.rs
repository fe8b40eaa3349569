use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;
use xr_core::{
    build_frame, Camera, FpsMeter, FrameClock, Handedness, InputEvent, InputFrame, Pose,
    SceneOptions, XrInput,
};

use crate::constants::{DESKTOP_HEAD_HEIGHT, FPS_WINDOW_SEC};
use crate::events::{EventQueue, SessionEvent};
use crate::overlay;
use crate::render::{Renderer, Viewport};
use crate::xr::{self, XrState};

pub struct FrameContext {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub renderer: Renderer,
    pub input: XrInput,
    pub events: EventQueue,
    pub xr: Option<XrState>,

    pub clock: FrameClock,
    pub fps: FpsMeter,
    pub spectator: Camera,
}

impl FrameContext {
    pub fn new(
        document: web::Document,
        canvas: web::HtmlCanvasElement,
        renderer: Renderer,
    ) -> Self {
        Self {
            document,
            canvas,
            renderer,
            input: XrInput::default(),
            events: EventQueue::default(),
            xr: None,
            clock: FrameClock::new(),
            fps: FpsMeter::new(FPS_WINDOW_SEC),
            spectator: Camera::spectator(1.0),
        }
    }

    fn begin_frame(&mut self) {
        self.clock.tick_now();
        for ev in self.events.drain() {
            match ev {
                SessionEvent::Input(e) => self.input.handle_event(e),
                SessionEvent::Ended => self.end_session(),
            }
        }
        if let Some(fps) = self.fps.record(self.clock.delta()) {
            overlay::set_fps(&self.document, fps, 1000.0 / fps.max(1.0));
        }
    }

    fn end_session(&mut self) {
        if self.xr.take().is_some() {
            for hand in [Handedness::Left, Handedness::Right] {
                self.input.handle_event(InputEvent::Disconnected(hand));
            }
            xr::session_ended(&self.document);
        }
    }

    /// Spectator view on the canvas while no XR session runs.
    pub fn desktop_frame(&mut self) {
        // XR frames stop once a session ends, so the end is picked up here
        if self.xr.is_some() && !self.events.has_ended() {
            return;
        }
        self.begin_frame();

        let frame = InputFrame {
            head: Pose::from_position(Vec3::Y * DESKTOP_HEAD_HEIGHT),
            ..Default::default()
        };
        self.input.on_animate(&self.clock, &frame);
        // nothing to vibrate outside a session
        _ = self.input.take_haptics();

        let vertices = build_frame(&self.input, &SceneOptions::default());
        self.renderer.upload(&vertices);

        let w = self.canvas.width();
        let h = self.canvas.height();
        self.spectator.set_aspect(w, h);
        let (w, h) = (w as i32, h as i32);
        self.renderer.begin(None, w, h);
        self.renderer.draw(
            Viewport {
                x: 0,
                y: 0,
                width: w,
                height: h,
            },
            self.spectator.view_proj(),
        );
    }

    /// One XR animation frame: read poses, run the input pipeline, draw each view.
    pub fn xr_frame(&mut self, frame: &web::XrFrame) {
        self.begin_frame();
        let Some(state) = self.xr.as_ref() else {
            return;
        };
        let Some(viewer) = frame.get_viewer_pose(&state.space) else {
            return;
        };

        let input_frame = xr::read_frame(frame, state, &viewer);
        self.input.on_animate(&self.clock, &input_frame);
        xr::send_haptics(&state.session, self.input.take_haptics());

        // the viewer is inside the head model
        let options = SceneOptions {
            head_model: false,
            ..Default::default()
        };
        let vertices = build_frame(&self.input, &options);
        self.renderer.upload(&vertices);

        let layer = &state.layer;
        self.renderer.begin(
            layer.framebuffer().as_ref(),
            layer.framebuffer_width() as i32,
            layer.framebuffer_height() as i32,
        );
        for (viewport, view_proj) in xr::views(state, &viewer) {
            self.renderer.draw(viewport, view_proj);
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().desktop_frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// Drive `frame_ctx` from the session's animation frames until it ends.
pub fn start_xr_loop(frame_ctx: Rc<RefCell<FrameContext>>, session: web::XrSession) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut(f64, web::XrFrame)>>>> =
        Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |_time: f64, frame: web::XrFrame| {
        let running = {
            let mut ctx = frame_ctx.borrow_mut();
            ctx.xr_frame(&frame);
            ctx.xr.is_some()
        };
        if running {
            if let Some(cb) = tick_clone.borrow().as_ref() {
                frame.session().request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut(f64, web::XrFrame)>));
    if let Some(cb) = tick.borrow().as_ref() {
        session.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
