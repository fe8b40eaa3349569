use web_sys as web;

use crate::constants::{
    FPS_OVERLAY_ID, VR_BUTTON_ID, VR_ENTER_LABEL, VR_EXIT_LABEL, VR_UNSUPPORTED_LABEL,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VrButtonState {
    Enter,
    Exit,
    Unsupported,
}

impl VrButtonState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Enter => VR_ENTER_LABEL,
            Self::Exit => VR_EXIT_LABEL,
            Self::Unsupported => VR_UNSUPPORTED_LABEL,
        }
    }
}

pub fn set_vr_button(document: &web::Document, state: VrButtonState) {
    if let Some(el) = document.get_element_by_id(VR_BUTTON_ID) {
        el.set_text_content(Some(state.label()));
        let cl = el.class_list();
        _ = cl.remove_1("hidden");
        if state == VrButtonState::Unsupported {
            _ = cl.add_1("disabled");
            _ = el.set_attribute("disabled", "");
        } else {
            _ = cl.remove_1("disabled");
            _ = el.remove_attribute("disabled");
        }
    }
}

/// Frame-rate readout in the stats corner.
pub fn set_fps(document: &web::Document, fps: f32, frame_ms: f32) {
    if let Some(el) = document.get_element_by_id(FPS_OVERLAY_ID) {
        el.set_text_content(Some(&format!("{:.0} FPS ({:.1} ms)", fps, frame_ms)));
    }
}
