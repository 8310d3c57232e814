use crate::app::{App, LineTarget};
use card_core::lines::parse_lines;
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Fetch a same-origin text file, bypassing the HTTP cache.
/// Any failure yields `None`; callers keep their defaults.
pub async fn fetch_text(window: &web::Window, path: &str) -> Option<String> {
    let opts = web::RequestInit::new();
    opts.set_cache(web::RequestCache::NoStore);
    let resp_value = match JsFuture::from(window.fetch_with_str_and_init(path, &opts)).await {
        Ok(v) => v,
        Err(e) => {
            log::debug!("[lines] fetch {} failed: {:?}", path, e);
            return None;
        }
    };
    let resp: web::Response = resp_value.dyn_into().ok()?;
    if !resp.ok() {
        log::debug!("[lines] fetch {} -> HTTP {}", path, resp.status());
        return None;
    }
    let text_js = JsFuture::from(resp.text().ok()?).await.ok()?;
    text_js.as_string()
}

/// Load the configured text lists one after another and hand each to the app.
pub async fn load_line_files(app: Weak<RefCell<App>>, window: web::Window, files: Vec<(LineTarget, String)>) {
    for (target, path) in files {
        let Some(text) = fetch_text(&window, &path).await else {
            continue;
        };
        let lines = parse_lines(&text);
        let Some(app) = app.upgrade() else {
            return;
        };
        let Ok(mut a) = app.try_borrow_mut() else {
            log::debug!("[lines] {} dropped, app busy", path);
            continue;
        };
        let applied = a.apply_lines(target, lines);
        log::debug!("[lines] {} ({:?}) applied={}", path, target, applied);
    }
}
