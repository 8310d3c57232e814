//! Declarative view trees.
//!
//! Renderers turn config + state into a [`Node`] tree; the web layer diffs
//! it against what is mounted and applies the difference. Event handlers are
//! plain [`Msg`] values, so a tree can be compared and inspected in tests.

mod chapters;
mod pages;
mod scene;

pub use chapters::*;
pub use pages::*;
pub use scene::*;

use crate::chase::Side;
use crate::config::GalleryVariant;
use smallvec::SmallVec;

/// Element ids shared between renderers and the web layer.
pub mod ids {
    pub const SINGLE_CARD: &str = "singleCard";
    pub const SCROLL_ROOT: &str = "scrollRoot";
    pub const SCROLLY_ROOT: &str = "scrollyRoot";
    pub const FLOAT_LAYER: &str = "floatLayer";
    pub const RESTART: &str = "restart";
    pub const PROGRESS_PILL: &str = "progressPill";
    pub const CHASE_ZONE: &str = "chaseZone";
    pub const CHASE_YES: &str = "chaseYes";
    pub const CHASE_NO: &str = "chaseNo";
    pub const CHASE_TAUNT: &str = "chaseTaunt";
    pub const RUNAWAY_NO: &str = "runawayNo";

    pub fn scene(id: &str) -> String {
        format!("scene-{id}")
    }

    pub fn chapter(id: &str) -> String {
        format!("chapter-{id}")
    }

    pub fn float(id: &str) -> String {
        format!("float-{id}")
    }

    pub fn gallery_item(chapter: &str, i: usize) -> String {
        format!("gallery-{chapter}-{i}")
    }
}

/// What a user interaction asks the app to do.
#[derive(Clone, Debug, PartialEq)]
pub enum Msg {
    /// Action `action` of scene `id`, resolved through the scene flow.
    Activate { id: String, action: usize },
    /// Action `action` of chapter `id`, resolved through the chapter flow.
    ActivateChapter { id: String, action: usize },
    Restart,
    ScrollToScene(String),
    ScrollToChapter(String),
    Open(String),
    ChaseClick(Side),
    RunawayApproach,
    SetGalleryVariant(GalleryVariant),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(s: impl Into<String>) -> Node {
        Node::Text(s.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    pub fn text_content(&self) -> String {
        match self {
            Node::Text(t) => t.clone(),
            Node::Element(e) => e.text_content(),
        }
    }
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: SmallVec<[(&'static str, String); 4]>,
    pub styles: SmallVec<[(&'static str, String); 2]>,
    pub on_click: Option<Msg>,
    /// Fired on pointer enter and pointer down.
    pub on_approach: Option<Msg>,
    pub children: Vec<Node>,
}

pub fn el(tag: &'static str) -> Element {
    Element {
        tag,
        ..Default::default()
    }
}

impl Element {
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn hidden(self, hidden: bool) -> Self {
        if hidden {
            self.attr("hidden", "")
        } else {
            self
        }
    }

    pub fn style(mut self, prop: &'static str, value: impl Into<String>) -> Self {
        self.styles.push((prop, value.into()));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<N: Into<Node>>(mut self, nodes: impl IntoIterator<Item = N>) -> Self {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, s: impl Into<String>) -> Self {
        self.child(Node::Text(s.into()))
    }

    pub fn on_click(mut self, msg: Msg) -> Self {
        self.on_click = Some(msg);
        self
    }

    pub fn on_approach(mut self, msg: Msg) -> Self {
        self.on_approach = Some(msg);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_style(&self, prop: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(k, _)| *k == prop)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|c| c.split_whitespace().any(|x| x == class))
    }

    pub fn is_hidden(&self) -> bool {
        self.get_attr("hidden").is_some()
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Depth-first search including `self`.
    pub fn find(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        self.child_elements().find_map(|c| c.find(pred))
    }

    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        if pred(self) {
            out.push(self);
        }
        for c in self.child_elements() {
            c.find_all(pred, out);
        }
    }

    pub fn find_id(&self, id: &str) -> Option<&Element> {
        self.find(&|e: &Element| e.get_attr("id") == Some(id))
    }

    pub fn find_class(&self, class: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        self.find_all(&|e: &Element| e.has_class(class), &mut out);
        out
    }
}

/// A rendered tree for one mount point.
#[derive(Clone, Debug, PartialEq)]
pub struct Mount {
    /// Id of the host element whose children the tree replaces.
    pub target: &'static str,
    pub nodes: Vec<Node>,
}

pub(crate) fn paragraphs(lines: &[String]) -> Vec<Node> {
    lines
        .iter()
        .map(|l| el("p").text(l.as_str()).into())
        .collect()
}

pub(crate) fn header(badge: Option<&str>, title_tag: &'static str, title: &str, subtitle: &str) -> Element {
    let mut h = el("header").class("header");
    if let Some(b) = badge {
        h = h.child(el("div").class("badge").text(b));
    }
    h.child(el(title_tag).class("title").text(title))
        .child(el("p").class("subtitle").text(subtitle))
}
