use super::{el, header, ids, paragraphs, Element, Mount, Msg, Node};
use crate::config::{Action, CardConfig, Scene};
use crate::constants::{INTRO_ID, NO_ID, QUESTION_ID};
use crate::error::Result;
use crate::flow::Flow;

pub(crate) fn button(action: &Action, msg: Msg) -> Element {
    el("button")
        .attr("type", "button")
        .class(action.variant.class())
        .text(action.label_or_default())
        .on_click(msg)
}

pub(crate) fn media(class: &'static str, src: Option<&str>, alt: &str) -> Option<Element> {
    let src = src?;
    Some(
        el("div")
            .class(class)
            .child(el("img").attr("src", src).attr("alt", alt)),
    )
}

/// Shared single-card layout used by scenes and response pages.
pub(crate) fn card(
    cfg: &CardConfig,
    title: &str,
    subtitle: &str,
    body: &[String],
    image: Option<Element>,
    actions: Vec<Node>,
    show_restart: bool,
) -> Vec<Node> {
    let mut nodes: Vec<Node> = vec![header(Some(cfg.badge_text.as_str()), "h1", title, subtitle).into()];
    if let Some(m) = image {
        nodes.push(m.id("media").into());
    }
    nodes.push(el("div").class("body").id("body").children(paragraphs(body)).into());
    nodes.push(el("div").class("actions").id("actions").children(actions).into());
    nodes.push(
        el("footer")
            .class("footer")
            .child(
                el("button")
                    .attr("type", "button")
                    .class("link")
                    .id(ids::RESTART)
                    .hidden(!show_restart)
                    .text("Restart")
                    .on_click(Msg::Restart),
            )
            .child(el("span").class("hint").text(cfg.hint_text.as_str()))
            .into(),
    );
    nodes
}

fn scene_actions(scene: &Scene, flow: &Flow) -> Result<Vec<Node>> {
    Ok(flow
        .visible_actions(&scene.id)?
        .filter_map(|i| scene.actions.get(i).map(|a| (i, a)))
        .map(|(i, a)| {
            button(
                a,
                Msg::Activate {
                    id: scene.id.clone(),
                    action: i,
                },
            )
            .into()
        })
        .collect())
}

/// Single-card rendering of scene `id`. Unknown ids are a fault.
pub fn single_card(cfg: &CardConfig, flow: &Flow, id: &str) -> Result<Mount> {
    let scene = &cfg.scenes[flow.position(id)?];
    let image = media("media", cfg.image_src(scene.image_key.as_deref()), &scene.image_alt);
    let actions = scene_actions(scene, flow)?;
    Ok(Mount {
        target: ids::SINGLE_CARD,
        nodes: card(
            cfg,
            &scene.title,
            &scene.subtitle,
            &scene.body,
            image,
            actions,
            id != INTRO_ID,
        ),
    })
}

fn is_runaway(cfg: &CardConfig, scene: &Scene, action: &Action) -> bool {
    cfg.runaway_no.enabled && scene.id == QUESTION_ID && action.runaway && action.targets(NO_ID)
}

/// Every scene stacked vertically, each a scroll anchor.
pub fn scroll_stack(cfg: &CardConfig, flow: &Flow) -> Result<Mount> {
    let reveal = cfg.reveal_on_scroll;
    let mut nodes = Vec::with_capacity(cfg.scenes.len());
    for (i, scene) in cfg.scenes.iter().enumerate() {
        let class = if reveal { "sceneCard" } else { "sceneCard isVisible" };
        let mut section = el("section")
            .class(class)
            .id(ids::scene(&scene.id))
            .attr("data-reveal", if reveal { "true" } else { "false" })
            .child(header(Some(cfg.badge_text.as_str()), "h2", &scene.title, &scene.subtitle));
        if let Some(m) = media("media", cfg.image_src(scene.image_key.as_deref()), &scene.image_alt) {
            section = section.child(m);
        }
        section = section.child(el("div").class("body").children(paragraphs(&scene.body)));

        let mut row = el("div").class("actions");
        for idx in flow.visible_actions(&scene.id)? {
            let Some(action) = scene.actions.get(idx) else { continue };
            let mut b = button(
                action,
                Msg::Activate {
                    id: scene.id.clone(),
                    action: idx,
                },
            );
            if is_runaway(cfg, scene, action) {
                b = b.id(ids::RUNAWAY_NO).on_approach(Msg::RunawayApproach);
            }
            row = row.child(b);
        }
        section = section.child(row);

        if scene.id == QUESTION_ID && cfg.allow_no {
            section = section.child(
                el("button")
                    .attr("type", "button")
                    .class("microLink")
                    .text("No thanks (serious)")
                    .on_click(Msg::ScrollToScene(NO_ID.to_string())),
            );
        }

        if let Some(next) = cfg.scenes.get(i + 1) {
            section = section.child(
                el("footer")
                    .class("footer")
                    .child(
                        el("button")
                            .attr("type", "button")
                            .class("link")
                            .text("Scroll to next ↓")
                            .on_click(Msg::ScrollToScene(next.id.clone())),
                    )
                    .child(el("span").class("hint").text(cfg.hint_text.as_str())),
            );
        }
        nodes.push(section.into());
    }
    Ok(Mount {
        target: ids::SCROLLY_ROOT,
        nodes,
    })
}
