#![cfg(target_arch = "wasm32")]
use crate::constants::{CONFETTI_CANVAS_ID, CONFIG_SCRIPT_ID, PAGE_ATTR};
use anyhow::anyhow;
use card_core::{CardConfig, CardError, PageKind, Plan};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod constants;
mod dom;
mod effects;
mod events;
mod fetch;
mod frame;
mod input;

thread_local! {
    // The mounted card lives as long as the page.
    static APP: RefCell<Option<app::Shared>> = RefCell::new(None);
}

fn read_config(document: &web::Document) -> anyhow::Result<CardConfig> {
    let text = document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|el| el.text_content())
        .ok_or_else(|| CardError::MissingConfig(format!("no #{CONFIG_SCRIPT_ID} element")))?;
    Ok(CardConfig::from_json(&text)?)
}

fn confetti_layer(window: &web::Window, document: &web::Document) -> Option<frame::ConfettiLayer> {
    let canvas = document
        .get_element_by_id(CONFETTI_CANVAS_ID)?
        .dyn_into::<web::HtmlCanvasElement>()
        .ok()?;
    let ctx = canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .ok()?;
    dom::sync_canvas_backing_size(window, &canvas, &ctx);
    Some(frame::ConfettiLayer::new(canvas, ctx))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("valentine-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow!("no document"))?;

    let cfg = Rc::new(read_config(&document)?);
    let page = PageKind::from_attr(
        document
            .body()
            .and_then(|b| b.get_attribute(PAGE_ATTR))
            .as_deref(),
    );
    let plan = Plan::resolve(page, &cfg);
    log::info!(
        "[init] page={:?} plan={:?} scenes={} chapters={}",
        page,
        plan,
        cfg.scenes.len(),
        cfg.chapters.len()
    );

    let confetti = confetti_layer(&window, &document);
    if confetti.is_none() {
        log::warn!("[init] missing #{} canvas, confetti disabled", CONFETTI_CANVAS_ID);
    }
    let driver = frame::Driver::new(frame::Stage {
        window: window.clone(),
        confetti,
    });
    let resize = events::wire_resize(&window, &driver).map_err(dom::js_err)?;

    let app = app::App::mount(window.clone(), document, cfg, plan, driver)?;
    app.borrow_mut().keep(resize);
    let files = app.borrow().line_files();
    APP.with(|slot| *slot.borrow_mut() = Some(app.clone()));

    // Text lists load after first render and only replace unused defaults.
    if !files.is_empty() {
        fetch::load_line_files(Rc::downgrade(&app), window, files).await;
    }
    Ok(())
}
