use crate::dom::{self, Listener};
use crate::frame::Driver;
use wasm_bindgen::JsValue;
use web_sys as web;

/// Keep the confetti canvas sized to the viewport.
pub fn wire_resize(window: &web::Window, driver: &Driver) -> Result<Listener, JsValue> {
    let driver = driver.clone();
    Listener::new(window, "resize", move |_ev| {
        driver.with_stage(|stage| {
            if let Some(layer) = &stage.confetti {
                dom::sync_canvas_backing_size(&stage.window, &layer.canvas, &layer.ctx);
            }
        });
    })
}
