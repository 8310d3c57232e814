use card_core::chase::Rect;
use card_core::progress::TrackRect;
use glam::Vec2;
use web_sys as web;

#[inline]
pub fn client_point(ev: &web::PointerEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

#[inline]
pub fn client_rect(el: &web::Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
}

#[inline]
pub fn track_rect(el: &web::Element) -> TrackRect {
    let r = el.get_bounding_client_rect();
    TrackRect {
        top: r.top() as f32,
        height: r.height() as f32,
    }
}

pub fn viewport(window: &web::Window) -> Vec2 {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Vec2::new(w as f32, h as f32)
}
