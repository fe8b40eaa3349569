use std::cell::RefCell;
use std::rc::Rc;

use web_sys as web;
use xr_core::{ConnectInfo, Handedness, InputEvent};

use crate::dom;

/// Things the XR session reports between frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Input(InputEvent),
    Ended,
}

/// Shared queue filled by session event listeners and drained by the frame
/// callback, so input state only ever changes inside a frame.
#[derive(Clone, Default)]
pub struct EventQueue(Rc<RefCell<Vec<SessionEvent>>>);

impl EventQueue {
    pub fn push(&self, event: SessionEvent) {
        self.0.borrow_mut().push(event);
    }

    pub fn has_ended(&self) -> bool {
        self.0.borrow().contains(&SessionEvent::Ended)
    }

    pub fn drain(&self) -> Vec<SessionEvent> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

pub fn handedness(source: &web::XrInputSource) -> Option<Handedness> {
    match source.handedness() {
        web::XrHandedness::Left => Some(Handedness::Left),
        web::XrHandedness::Right => Some(Handedness::Right),
        _ => None,
    }
}

pub fn connect_info(source: &web::XrInputSource) -> ConnectInfo {
    ConnectInfo {
        handedness: handedness(source),
        has_hand: source.hand().is_some(),
        has_gamepad: source.gamepad().is_some(),
        has_grip: source.grip_space().is_some(),
    }
}

fn for_each_source(list: &js_sys::Array, mut f: impl FnMut(web::XrInputSource)) {
    for value in list.iter() {
        if let Ok(source) = wasm_bindgen::JsCast::dyn_into::<web::XrInputSource>(value) {
            f(source);
        }
    }
}

fn wire_button_event(
    session: &web::XrSession,
    queue: &EventQueue,
    name: &str,
    make: fn(Handedness) -> InputEvent,
) {
    let queue = queue.clone();
    dom::add_listener(session, name, move |ev: web::XrInputSourceEvent| {
        if let Some(hand) = handedness(&ev.input_source()) {
            queue.push(SessionEvent::Input(make(hand)));
        }
    });
}

/// Queue connect/disconnect, select, squeeze and end events from `session`.
pub fn wire_session_events(session: &web::XrSession, queue: &EventQueue) {
    let q = queue.clone();
    dom::add_listener(
        session,
        "inputsourceschange",
        move |ev: web::XrInputSourcesChangeEvent| {
            // removals first so a swap (controller -> hand) lands as the new kind
            for_each_source(&ev.removed(), |source| {
                if let Some(hand) = handedness(&source) {
                    q.push(SessionEvent::Input(InputEvent::Disconnected(hand)));
                }
            });
            for_each_source(&ev.added(), |source| {
                q.push(SessionEvent::Input(InputEvent::Connected(connect_info(&source))));
            });
        },
    );

    wire_button_event(session, queue, "selectstart", InputEvent::SelectStart);
    wire_button_event(session, queue, "selectend", InputEvent::SelectEnd);
    wire_button_event(session, queue, "squeezestart", InputEvent::SqueezeStart);
    wire_button_event(session, queue, "squeezeend", InputEvent::SqueezeEnd);

    let q = queue.clone();
    dom::add_listener(session, "end", move |_: web::Event| {
        q.push(SessionEvent::Ended);
    });
}
