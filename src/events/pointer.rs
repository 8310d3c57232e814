use crate::app::App;
use crate::dom::Listener;
use crate::input;
use card_core::view::ids;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Feed pointer moves and presses inside the chase zone to the game.
pub fn wire_chase_zone(app: &Rc<RefCell<App>>, document: &web::Document) -> Result<Vec<Listener>, JsValue> {
    let Some(zone) = document.get_element_by_id(ids::CHASE_ZONE) else {
        return Ok(Vec::new());
    };
    let mut out = Vec::with_capacity(2);
    for event in ["pointermove", "pointerdown"] {
        let weak = Rc::downgrade(app);
        out.push(Listener::new(&zone, event, move |ev: web::Event| {
            let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
                return;
            };
            let Some(app) = weak.upgrade() else {
                return;
            };
            let point = input::client_point(ev);
            match app.try_borrow_mut() {
                Ok(mut a) => a.chase_pointer(point),
                Err(_) => log::debug!("[chase] pointer event skipped, app busy"),
            }
        })?);
    }
    Ok(out)
}
