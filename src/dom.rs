use crate::constants::{MIN_DPR, REDUCED_MOTION_QUERY};
use anyhow::anyhow;
use card_core::view::{Element, Mount, Msg, Node};
use fnv::FnvHashMap;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Receives every message raised by a mounted tree.
pub type Dispatch = Rc<dyn Fn(Msg)>;

pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow!("{:?}", e)
}

/// An event listener that detaches itself when dropped.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Fire-and-forget timer.
pub fn set_timeout(window: &web::Window, ms: i32, f: impl FnOnce() + 'static) {
    let cb = Closure::once_into_js(f);
    if let Err(e) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms)
    {
        log::warn!("setTimeout failed: {:?}", e);
    }
}

pub fn prefers_reduced_motion(window: &web::Window) -> bool {
    matches!(window.match_media(REDUCED_MOTION_QUERY), Ok(Some(mql)) if mql.matches())
}

pub fn set_style(el: &web::Element, prop: &str, value: &str) {
    if let Some(h) = el.dyn_ref::<web::HtmlElement>() {
        let _ = h.style().set_property(prop, value);
    }
}

pub fn set_class(el: &web::Element, class: &str, on: bool) {
    let list = el.class_list();
    let _ = if on { list.add_1(class) } else { list.remove_1(class) };
}

pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_hidden(document: &web::Document, id: &str, hidden: bool) {
    if let Some(el) = document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<web::HtmlElement>().ok())
    {
        el.set_hidden(hidden);
    }
}

pub fn scroll_into_view(el: &web::Element, smooth: bool) {
    let opts = web::ScrollIntoViewOptions::new();
    opts.set_behavior(if smooth {
        web::ScrollBehavior::Smooth
    } else {
        web::ScrollBehavior::Auto
    });
    opts.set_block(web::ScrollLogicalPosition::Start);
    el.scroll_into_view_with_scroll_into_view_options(&opts);
}

pub fn scroll_by(window: &web::Window, dy: f32) {
    let opts = web::ScrollToOptions::new();
    opts.set_top(dy as f64);
    opts.set_behavior(web::ScrollBehavior::Smooth);
    window.scroll_by_with_scroll_to_options(&opts);
}

/// Match the canvas backing store to the viewport at the device pixel ratio,
/// leaving the 2D context scaled so drawing happens in CSS pixels.
pub fn sync_canvas_backing_size(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    ctx: &web::CanvasRenderingContext2d,
) {
    let dpr = window.device_pixel_ratio().floor().max(MIN_DPR);
    let size = crate::input::viewport(window);
    canvas.set_width((size.x as f64 * dpr) as u32);
    canvas.set_height((size.y as f64 * dpr) as u32);
    let style = canvas.style();
    let _ = style.set_property("width", &crate::constants::px(size.x));
    let _ = style.set_property("height", &crate::constants::px(size.y));
    let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
}

// ---------------- Declarative tree application ----------------

/// A materialized node plus the shallow view it was built from.
struct Live {
    node: web::Node,
    view: Node,
    listeners: Vec<Listener>,
    children: Vec<Live>,
}

/// Copy of a view node without its children.
fn shallow(view: &Node) -> Node {
    match view {
        Node::Text(t) => Node::Text(t.clone()),
        Node::Element(e) => Node::Element(Element {
            tag: e.tag,
            attrs: e.attrs.clone(),
            styles: e.styles.clone(),
            on_click: e.on_click.clone(),
            on_approach: e.on_approach.clone(),
            children: Vec::new(),
        }),
    }
}

fn same_kind(a: &Node, b: &Node) -> bool {
    match (a, b) {
        (Node::Text(_), Node::Text(_)) => true,
        (Node::Element(x), Node::Element(y)) => x.tag == y.tag,
        _ => false,
    }
}

/// Applies [`Mount`]s to the document, patching what is already there.
pub struct Renderer {
    document: web::Document,
    dispatch: Dispatch,
    mounts: FnvHashMap<&'static str, Vec<Live>>,
}

impl Renderer {
    pub fn new(document: web::Document, dispatch: Dispatch) -> Self {
        Self {
            document,
            dispatch,
            mounts: FnvHashMap::default(),
        }
    }

    pub fn apply(&mut self, mount: &Mount) -> anyhow::Result<()> {
        let host = self
            .document
            .get_element_by_id(mount.target)
            .ok_or_else(|| anyhow!("missing #{}", mount.target))?;
        let live = self.mounts.entry(mount.target).or_insert_with(|| {
            host.set_inner_html("");
            Vec::new()
        });
        let b = Builder {
            document: &self.document,
            dispatch: &self.dispatch,
        };
        b.patch_children(&host, live, &mount.nodes).map_err(js_err)
    }
}

struct Builder<'a> {
    document: &'a web::Document,
    dispatch: &'a Dispatch,
}

impl Builder<'_> {
    fn patch_children(&self, parent: &web::Node, live: &mut Vec<Live>, next: &[Node]) -> Result<(), JsValue> {
        for (i, view) in next.iter().enumerate() {
            if i >= live.len() {
                let fresh = self.create(view)?;
                parent.append_child(&fresh.node)?;
                live.push(fresh);
                continue;
            }
            let cur = &mut live[i];
            if same_kind(&cur.view, view) {
                self.patch(cur, view)?;
            } else {
                let fresh = self.create(view)?;
                parent.replace_child(&fresh.node, &cur.node)?;
                *cur = fresh;
            }
        }
        while live.len() > next.len() {
            if let Some(old) = live.pop() {
                parent.remove_child(&old.node)?;
            }
        }
        Ok(())
    }

    fn create(&self, view: &Node) -> Result<Live, JsValue> {
        match view {
            Node::Text(t) => Ok(Live {
                node: self.document.create_text_node(t).into(),
                view: shallow(view),
                listeners: Vec::new(),
                children: Vec::new(),
            }),
            Node::Element(e) => {
                let el = self.document.create_element(e.tag)?;
                for (k, v) in &e.attrs {
                    el.set_attribute(k, v)?;
                }
                for (k, v) in &e.styles {
                    set_style(&el, k, v);
                }
                let listeners = self.listen(&el, e)?;
                let mut children = Vec::with_capacity(e.children.len());
                for c in &e.children {
                    let live = self.create(c)?;
                    el.append_child(&live.node)?;
                    children.push(live);
                }
                Ok(Live {
                    node: el.into(),
                    view: shallow(view),
                    listeners,
                    children,
                })
            }
        }
    }

    fn patch(&self, cur: &mut Live, view: &Node) -> Result<(), JsValue> {
        match (&cur.view, view) {
            (Node::Text(old), Node::Text(new)) => {
                if old != new {
                    cur.node.set_text_content(Some(new.as_str()));
                }
            }
            (Node::Element(old), Node::Element(new)) => {
                let el: &web::Element = cur.node.unchecked_ref();
                for (k, v) in &new.attrs {
                    if old.get_attr(k) != Some(v.as_str()) {
                        el.set_attribute(k, v)?;
                    }
                }
                for (k, _) in &old.attrs {
                    if new.get_attr(k).is_none() {
                        el.remove_attribute(k)?;
                    }
                }
                if let Some(h) = el.dyn_ref::<web::HtmlElement>() {
                    for (k, v) in &new.styles {
                        if old.get_style(k) != Some(v.as_str()) {
                            h.style().set_property(k, v)?;
                        }
                    }
                    for (k, _) in &old.styles {
                        if new.get_style(k).is_none() {
                            h.style().remove_property(k)?;
                        }
                    }
                }
                if old.on_click != new.on_click || old.on_approach != new.on_approach {
                    cur.listeners = self.listen(el, new)?;
                }
                let el = el.clone();
                self.patch_children(&el, &mut cur.children, &new.children)?;
            }
            _ => {}
        }
        cur.view = shallow(view);
        Ok(())
    }

    fn listen(&self, el: &web::Element, e: &Element) -> Result<Vec<Listener>, JsValue> {
        let mut out = Vec::new();
        if let Some(msg) = &e.on_click {
            out.push(self.listener(el, "click", msg.clone())?);
        }
        if let Some(msg) = &e.on_approach {
            out.push(self.listener(el, "pointerenter", msg.clone())?);
            out.push(self.listener(el, "pointerdown", msg.clone())?);
        }
        Ok(out)
    }

    fn listener(&self, el: &web::Element, event: &'static str, msg: Msg) -> Result<Listener, JsValue> {
        let dispatch = self.dispatch.clone();
        Listener::new(el, event, move |_ev| dispatch(msg.clone()))
    }
}
