use super::scene::{button, card, media};
use super::{el, header, ids, paragraphs, Element, Mount, Msg, Node};
use crate::chase::{ChaseHost, Side};
use crate::config::{CardConfig, QuestionPage, ResponsePage};

/// Inputs for the chase zone shared by the question chapter and page.
pub struct ChaseZoneProps<'a> {
    pub host: ChaseHost,
    pub yes_label: &'a str,
    /// `None` when `allowNo` is false: the No button is not rendered at all.
    pub no_label: Option<&'a str>,
    pub taunt: &'a str,
    pub serious_yes: Option<Msg>,
    pub serious_no: Option<Msg>,
}

fn chase_button(id: &'static str, class: &'static str, side: Side, label: &str, left: &str, top: &str) -> Element {
    el("button")
        .attr("type", "button")
        .class(class)
        .id(id)
        .attr("data-chase", side.as_str())
        .style("position", "absolute")
        .style("left", left)
        .style("top", top)
        .text(label)
        .on_click(Msg::ChaseClick(side))
}

fn micro_link(label: &str, msg: Msg) -> Element {
    el("button")
        .attr("type", "button")
        .class("microLink")
        .text(label)
        .on_click(msg)
}

pub fn chase_zone(props: &ChaseZoneProps) -> Vec<Node> {
    let (zone_class, yes_top, no_left) = match props.host {
        ChaseHost::Chapter => ("chaseZone", "38%", "58%"),
        ChaseHost::Page => ("chaseZone chaseFull", "42%", "62%"),
    };
    let mut zone = el("div").class(zone_class).id(ids::CHASE_ZONE).child(chase_button(
        ids::CHASE_YES,
        "btn btnPrimary",
        Side::Yes,
        props.yes_label,
        "18%",
        yes_top,
    ));
    if let Some(label) = props.no_label {
        zone = zone.child(chase_button(
            ids::CHASE_NO,
            "btn btnSecondary",
            Side::No,
            label,
            no_left,
            "58%",
        ));
    }

    let mut hud = el("div")
        .class("chaseHud")
        .child(el("div").class("taunt").id(ids::CHASE_TAUNT).text(props.taunt));
    if props.host == ChaseHost::Chapter {
        hud = hud.child(
            el("div")
                .class("microNote")
                .text("This is just a playful effect — your choice is always respected."),
        );
    }

    let mut nodes: Vec<Node> = vec![zone.into(), hud.into()];
    let mut serious = el("div").class("microRow");
    if let Some(msg) = &props.serious_yes {
        serious = serious.child(micro_link("Yes (serious)", msg.clone()));
    }
    if let Some(msg) = &props.serious_no {
        serious = serious.child(micro_link("No thanks (serious)", msg.clone()));
    }
    if !serious.children.is_empty() {
        nodes.push(serious.into());
    }
    nodes
}

/// Full-page question with the chase zone and confirm loop.
pub fn question_page(cfg: &CardConfig, q: &QuestionPage, taunt: &str) -> Mount {
    let serious = cfg.allow_no && cfg.chase.show_serious_links;
    let props = ChaseZoneProps {
        host: ChaseHost::Page,
        yes_label: &q.yes_label,
        no_label: cfg.allow_no.then_some(q.no_label.as_str()),
        taunt,
        serious_yes: serious.then(|| Msg::Open(q.yes_href.clone())),
        serious_no: serious.then(|| Msg::Open(q.no_href.clone())),
    };
    let section = el("section")
        .class("chapter chapterFull")
        .child(header(Some(cfg.badge_text.as_str()), "h1", &q.title, &q.subtitle))
        .child(el("div").class("body").children(paragraphs(&q.body)))
        .children(chase_zone(&props))
        .child(el("div").class("microNote").text(cfg.hint_text.as_str()));
    Mount {
        target: ids::SCROLLY_ROOT,
        nodes: vec![section.into()],
    }
}

/// Standalone yes/no page: a single card whose actions are links.
pub fn response_page(cfg: &CardConfig, page: &ResponsePage) -> Mount {
    let image = media("media", cfg.image_src(page.image_key.as_deref()), &page.image_alt);
    let actions = page
        .actions
        .iter()
        .map(|a| match &a.href {
            Some(href) => button(a, Msg::Open(href.clone())).into(),
            None => el("button")
                .attr("type", "button")
                .class(a.variant.class())
                .text(a.label_or_default())
                .into(),
        })
        .collect();
    Mount {
        target: ids::SINGLE_CARD,
        nodes: card(cfg, &page.title, &page.subtitle, &page.body, image, actions, false),
    }
}
