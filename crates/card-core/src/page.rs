//! Page identity and render-mode resolution.

use crate::config::{CardConfig, Chapter, Mode};
use crate::constants::{NO_ID, YES_ID};

/// Identity read from `<body data-page="...">`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageKind {
    Story,
    Question,
    Yes,
    No,
    Fallback,
}

impl PageKind {
    pub fn from_attr(attr: Option<&str>) -> Self {
        match attr.map(|a| a.trim().to_ascii_lowercase()).as_deref() {
            Some("story") => PageKind::Story,
            Some("question") => PageKind::Question,
            Some("yes") => PageKind::Yes,
            Some("no") => PageKind::No,
            _ => PageKind::Fallback,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Response {
    Yes,
    No,
}

impl Response {
    pub fn id(self) -> &'static str {
        match self {
            Response::Yes => YES_ID,
            Response::No => NO_ID,
        }
    }
}

/// Concrete presentation chosen for this page load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plan {
    SingleCard,
    ScrollStack,
    Chapters,
    Story,
    QuestionPage,
    ResponsePage(Response),
    /// Response page without a `pages.<kind>` entry: show the scene instead.
    ResponseScene(Response),
}

impl Plan {
    pub fn resolve(page: PageKind, cfg: &CardConfig) -> Plan {
        match page {
            PageKind::Story => {
                let has_story = cfg
                    .pages
                    .story
                    .as_ref()
                    .is_some_and(|s| !s.chapters.is_empty());
                if has_story {
                    Plan::Story
                } else {
                    Self::scrolly(cfg)
                }
            }
            PageKind::Question => Plan::QuestionPage,
            PageKind::Yes => Self::response(cfg, Response::Yes),
            PageKind::No => Self::response(cfg, Response::No),
            PageKind::Fallback => match cfg.mode {
                Mode::Scrolly => Self::scrolly(cfg),
                Mode::Scroll => Plan::ScrollStack,
                Mode::Single => Plan::SingleCard,
            },
        }
    }

    fn scrolly(cfg: &CardConfig) -> Plan {
        if cfg.chapters.is_empty() {
            Plan::ScrollStack
        } else {
            Plan::Chapters
        }
    }

    fn response(cfg: &CardConfig, kind: Response) -> Plan {
        let page = match kind {
            Response::Yes => &cfg.pages.yes,
            Response::No => &cfg.pages.no,
        };
        if page.is_some() {
            Plan::ResponsePage(kind)
        } else {
            Plan::ResponseScene(kind)
        }
    }

    /// Whether the plan renders into the scroll root rather than the single card.
    pub fn uses_scroll_root(self) -> bool {
        matches!(
            self,
            Plan::ScrollStack | Plan::Chapters | Plan::Story | Plan::QuestionPage
        )
    }

    /// Chapters mounted by this plan: the story's own list on the story page.
    pub fn chapters(self, cfg: &CardConfig) -> &[Chapter] {
        match self {
            Plan::Story => cfg
                .pages
                .story
                .as_ref()
                .map_or(&[][..], |s| s.chapters.as_slice()),
            Plan::Chapters => &cfg.chapters,
            _ => &[],
        }
    }

    /// Whether entering `id` under this plan should fire confetti.
    pub fn confetti_on(self, cfg: &CardConfig, id: &str) -> bool {
        match self {
            Plan::Chapters | Plan::Story => self
                .chapters(cfg)
                .iter()
                .any(|c| c.id() == id && c.content.confetti),
            _ => cfg.scenes.iter().any(|s| s.id == id && s.confetti),
        }
    }
}
