use super::pages::{chase_zone, ChaseZoneProps};
use super::scene::{button, media};
use super::{el, header, ids, paragraphs, Element, Mount, Msg, Node};
use crate::chase::ChaseHost;
use crate::config::{CardConfig, Chapter, Cta, Gallery, GalleryVariant, Layout};
use crate::constants::{CTA_TRACK_VH, NO_ID, YES_ID};
use crate::error::Result;
use crate::flow::Flow;
use crate::progress::float_pose;

/// Render-time knobs for chapter tracks.
#[derive(Clone, Debug, Default)]
pub struct ChapterOptions {
    /// Variant forced by the `gallery` query parameter.
    pub gallery_override: Option<GalleryVariant>,
    /// Show the gallery variant switcher (query override present).
    pub gallery_debug: bool,
    /// Reduced motion: reveal galleries fully, no progress tracking.
    pub reveal_all: bool,
    /// Initial taunt for a question-layout chapter.
    pub taunt: String,
}

fn track(id: Option<&str>, vh: f32, chapter: Element) -> Element {
    let mut t = el("div").class("chapterTrack");
    if let Some(id) = id {
        t = t.id(ids::chapter(id));
    }
    t.style("--trackH", format!("{vh:.0}vh"))
        .child(el("div").class("chapterSticky").child(chapter))
}

pub fn gallery_view(chapter_id: &str, gallery: &Gallery, cfg: &CardConfig, opts: &ChapterOptions) -> Vec<Node> {
    let variant = opts
        .gallery_override
        .or(gallery.variant)
        .unwrap_or(cfg.gallery_variant);
    let items = gallery.items.iter().enumerate().map(|(i, item)| {
        let src = item
            .src
            .as_deref()
            .or_else(|| cfg.image_src(item.image_key.as_deref()))
            .unwrap_or_default();
        let class = if opts.reveal_all {
            "galleryItem isRevealed"
        } else {
            "galleryItem"
        };
        let mut fig = el("figure")
            .class(class)
            .id(ids::gallery_item(chapter_id, i))
            .child(el("img").attr("src", src).attr("alt", item.alt.as_str()));
        if !item.caption.is_empty() {
            fig = fig.child(el("figcaption").text(item.caption.as_str()));
        }
        fig
    });
    let mut nodes: Vec<Node> = vec![el("div")
        .class(format!("gallery gallery--{}", variant.as_str()))
        .attr("data-variant", variant.as_str())
        .children(items)
        .into()];
    if opts.gallery_debug {
        let switches = GalleryVariant::ALL.iter().map(|v| {
            let class = if *v == variant { "microLink isActive" } else { "microLink" };
            el("button")
                .attr("type", "button")
                .class(class)
                .text(v.as_str())
                .on_click(Msg::SetGalleryVariant(*v))
        });
        nodes.push(el("div").class("galleryDebug").children(switches).into());
    }
    nodes
}

fn chapter_section(cfg: &CardConfig, flow: &Flow, ch: &Chapter, opts: &ChapterOptions) -> Result<Element> {
    let c = &ch.content;
    let badge = ch.show_badge.then_some(cfg.badge_text.as_str());

    let mut left = el("div").class("body").children(paragraphs(&c.body));
    let buttons: Vec<Element> = flow
        .visible_actions(ch.id())?
        .filter_map(|i| c.actions.get(i).map(|a| (i, a)))
        .map(|(i, a)| {
            button(
                a,
                Msg::ActivateChapter {
                    id: c.id.clone(),
                    action: i,
                },
            )
        })
        .collect();
    if !buttons.is_empty() {
        left = left.child(el("div").class("actions").children(buttons));
    }

    let mut right = el("div");
    match ch.layout {
        Layout::Question => {
            let serious = cfg.allow_no && cfg.chase.show_serious_links;
            let props = ChaseZoneProps {
                host: ChaseHost::Chapter,
                yes_label: "Yes 💖",
                no_label: cfg.allow_no.then_some("Not this time"),
                taunt: &opts.taunt,
                serious_yes: serious.then(|| Msg::ScrollToChapter(YES_ID.to_string())),
                serious_no: serious.then(|| Msg::ScrollToChapter(NO_ID.to_string())),
            };
            right = right.children(chase_zone(&props));
        }
        Layout::Split => {
            if let Some(m) = media("chapterMedia", cfg.image_src(c.image_key.as_deref()), &c.image_alt) {
                right = right.child(m);
            }
            if let Some(g) = &ch.gallery {
                right = right.children(gallery_view(ch.id(), g, cfg, opts));
            }
        }
    }

    Ok(el("section")
        .class("chapter")
        .attr("data-chapter-id", ch.id())
        .child(header(badge, "h2", &c.title, &c.subtitle))
        .child(el("div").class("chapterGrid").child(left).child(right)))
}

fn cta_track(cfg: &CardConfig, cta: &Cta) -> Option<Element> {
    let href = cta.href.as_deref()?;
    let title = if cta.title.is_empty() { "One more thing…" } else { cta.title.as_str() };
    let label = if cta.label.is_empty() { "Next →" } else { cta.label.as_str() };
    let chapter = el("section")
        .class("chapter")
        .child(header(Some(cfg.badge_text.as_str()), "h2", title, &cta.subtitle))
        .child(el("div").class("body").child(el("p").text("When you’re ready, click below.")))
        .child(
            el("div").class("actions").child(
                el("button")
                    .attr("type", "button")
                    .class("btn btnPrimary")
                    .text(label)
                    .on_click(Msg::Open(href.to_string())),
            ),
        );
    Some(track(None, CTA_TRACK_VH, chapter))
}

/// Pinned chapter tracks with the progress pill on top.
///
/// `flow` must be built from the same `chapters` slice.
pub fn chapters_view(
    cfg: &CardConfig,
    flow: &Flow,
    chapters: &[Chapter],
    cta: Option<&Cta>,
    opts: &ChapterOptions,
) -> Result<Mount> {
    let mut nodes: Vec<Node> = vec![el("div")
        .class("progressPill")
        .id(ids::PROGRESS_PILL)
        .text("Scroll")
        .into()];
    for ch in chapters {
        let section = chapter_section(cfg, flow, ch, opts)?;
        nodes.push(track(Some(ch.id()), ch.track_vh(), section).into());
    }
    if let Some(t) = cta.and_then(|c| cta_track(cfg, c)) {
        nodes.push(t.into());
    }
    Ok(Mount {
        target: ids::SCROLLY_ROOT,
        nodes,
    })
}

/// Floating sprites; posed statically when motion is reduced.
pub fn floats_view(cfg: &CardConfig, static_pose: bool) -> Mount {
    let nodes = cfg
        .floating
        .iter()
        .map(|f| {
            let src = f
                .src
                .as_deref()
                .or_else(|| cfg.image_src(f.image_key.as_deref()))
                .unwrap_or_default();
            let mut node = el("div")
                .class("floatItem")
                .id(ids::float(&f.id))
                .style("--w", format!("{:.0}px", f.width_px()));
            if static_pose {
                let pose = float_pose(f, 0.0);
                node = node
                    .style("opacity", format!("{}", pose.opacity))
                    .style("transform", pose.css());
            } else {
                node = node.style("opacity", "0");
            }
            node.child(el("img").attr("src", src).attr("alt", "")).into()
        })
        .collect();
    Mount {
        target: ids::FLOAT_LAYER,
        nodes,
    }
}
