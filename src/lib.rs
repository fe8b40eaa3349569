#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod convert;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;
mod xr;

use constants::{CANVAS_ID, SESSION_MODE, VR_BUTTON_ID};
use overlay::VrButtonState;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("xr-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn wire_vr_button(document: &web::Document, frame_ctx: &Rc<RefCell<frame::FrameContext>>) {
    let frame_ctx = frame_ctx.clone();
    dom::add_click_listener(document, VR_BUTTON_ID, move || {
        let frame_ctx = frame_ctx.clone();
        spawn_local(async move {
            if let Err(e) = xr::toggle_session(frame_ctx).await {
                log::error!("[xr] could not start session: {:?}", e);
            }
        });
    });
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::wire_canvas_resize(&canvas);

    let gl = render::create_context(&canvas)?;
    let renderer = render::Renderer::new(gl)?;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        document.clone(),
        canvas,
        renderer,
    )));
    frame::start_loop(frame_ctx.clone());

    if xr::immersive_vr_supported().await {
        log::info!("[xr] {} supported", SESSION_MODE);
        overlay::set_vr_button(&document, VrButtonState::Enter);
        wire_vr_button(&document, &frame_ctx);
    } else {
        log::info!("[xr] {} not supported; spectator view only", SESSION_MODE);
        overlay::set_vr_button(&document, VrButtonState::Unsupported);
    }
    Ok(())
}
