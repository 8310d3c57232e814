//! Mounted card state and the message handler behind every interaction.

use crate::constants::*;
use crate::dom::{self, Dispatch, Listener, Renderer};
use crate::effects::{ConfettiEffect, KickEffect, ProgressEffect, RevealEffect};
use crate::events;
use crate::frame::Driver;
use crate::input;
use card_core::chase::{pop_sequence, ChaseGame, ChaseHost, ClickOutcome, ConfirmLoop, ConfirmStep, Kick, Runaway, Side, ZoneGeometry};
use card_core::config::{CardConfig, Layout, QuestionPage, ResponsePage};
use card_core::confetti::Burst;
use card_core::constants::{CONFETTI_COUNT, INTRO_ID, NO_ID, YES_ID};
use card_core::flow::{Flow, Transition};
use card_core::location;
use card_core::page::{Plan, Response};
use card_core::view::{self, ids, ChapterOptions, Msg};
use glam::Vec2;
use rand::prelude::*;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub type Shared = Rc<RefCell<App>>;

/// Which in-memory list a fetched text file replaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineTarget {
    Taunts,
    YesTaunts,
    NoTaunts,
    Prompts,
}

pub struct App {
    this: Weak<RefCell<App>>,
    cfg: Rc<CardConfig>,
    plan: Plan,
    window: web::Window,
    document: web::Document,
    reduced_motion: bool,
    flow: Flow,
    renderer: Renderer,
    driver: Driver,
    chase: Option<ChaseGame>,
    confirm: Option<ConfirmLoop>,
    question: Option<QuestionPage>,
    runaway: Option<Runaway>,
    rng: StdRng,
    listeners: Vec<Listener>,
}

fn response_of(cfg: &CardConfig, kind: Response) -> Option<&ResponsePage> {
    match kind {
        Response::Yes => cfg.pages.yes.as_ref(),
        Response::No => cfg.pages.no.as_ref(),
    }
}

fn side_id(side: Side) -> &'static str {
    match side {
        Side::Yes => YES_ID,
        Side::No => NO_ID,
    }
}

/// Messages are handled in a fresh task, after the listener that raised them
/// has returned, so a re-render may safely drop that listener.
fn dispatcher(weak: Weak<RefCell<App>>) -> Dispatch {
    Rc::new(move |msg: Msg| {
        let weak = weak.clone();
        spawn_local(async move {
            let Some(app) = weak.upgrade() else {
                return;
            };
            let result = app.borrow_mut().handle(msg);
            if let Err(e) = result {
                log::error!("[app] {:?}", e);
            }
        });
    })
}

impl App {
    pub fn mount(
        window: web::Window,
        document: web::Document,
        cfg: Rc<CardConfig>,
        plan: Plan,
        driver: Driver,
    ) -> anyhow::Result<Shared> {
        let reduced_motion = dom::prefers_reduced_motion(&window);
        let flow = match plan {
            Plan::Chapters | Plan::Story => {
                Flow::new(plan.chapters(&cfg).iter().map(|c| &c.content), cfg.allow_no)
            }
            _ => Flow::for_scenes(&cfg),
        };
        let app = Rc::new_cyclic(|weak: &Weak<RefCell<App>>| {
            RefCell::new(App {
                this: weak.clone(),
                renderer: Renderer::new(document.clone(), dispatcher(weak.clone())),
                cfg,
                plan,
                window,
                document: document.clone(),
                reduced_motion,
                flow,
                driver,
                chase: None,
                confirm: None,
                question: None,
                runaway: None,
                rng: StdRng::from_entropy(),
                listeners: Vec::new(),
            })
        });

        let chase_live = {
            let mut a = app.borrow_mut();
            a.render()?;
            a.chase.as_ref().is_some_and(ChaseGame::enabled)
        };
        if chase_live {
            let listeners = events::wire_chase_zone(&app, &document).map_err(dom::js_err)?;
            app.borrow_mut().listeners.extend(listeners);
        }
        log::info!(
            "[app] mounted plan={:?} reduced_motion={} chase={}",
            plan,
            reduced_motion,
            chase_live
        );
        Ok(app)
    }

    /// Hold a listener for the lifetime of the page.
    pub fn keep(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    fn render(&mut self) -> anyhow::Result<()> {
        let scroll = self.plan.uses_scroll_root();
        dom::set_hidden(&self.document, ids::SINGLE_CARD, scroll);
        dom::set_hidden(&self.document, ids::SCROLL_ROOT, !scroll);

        let title = match self.plan {
            Plan::ResponsePage(kind) => response_of(&self.cfg, kind)
                .map(|p| p.title.as_str())
                .filter(|t| !t.is_empty()),
            _ => None,
        }
        .unwrap_or(self.cfg.page_title.as_str());
        if !title.is_empty() {
            self.document.set_title(title);
        }

        let hash = self.window.location().hash().unwrap_or_default();
        match self.plan {
            Plan::SingleCard => {
                let id = self.flow.initial_from_hash(&hash);
                self.show_scene(&id)
            }
            Plan::ResponseScene(kind) => self.show_scene(kind.id()),
            Plan::ScrollStack => self.mount_scroll_stack(&hash),
            Plan::Chapters | Plan::Story => self.mount_chapters(&hash),
            Plan::QuestionPage => self.mount_question_page(),
            Plan::ResponsePage(kind) => self.mount_response_page(kind),
        }
    }

    fn show_scene(&mut self, id: &str) -> anyhow::Result<()> {
        let mount = view::single_card(&self.cfg, &self.flow, id)?;
        self.renderer.apply(&mount)?;
        self.flow.enter(id)?;
        if self.plan.confetti_on(&self.cfg, id) {
            self.burst_confetti();
        }
        self.replace_hash(id);
        Ok(())
    }

    fn mount_scroll_stack(&mut self, hash: &str) -> anyhow::Result<()> {
        let mount = view::scroll_stack(&self.cfg, &self.flow)?;
        self.renderer.apply(&mount)?;

        if self.cfg.reveal_on_scroll {
            let cards: Vec<web::Element> = self
                .cfg
                .scenes
                .iter()
                .filter_map(|s| self.document.get_element_by_id(&ids::scene(&s.id)))
                .collect();
            if self.reduced_motion {
                for card in &cards {
                    dom::set_class(card, VISIBLE_CLASS, true);
                }
            } else {
                self.driver
                    .register(|t| t.replace(REVEAL_EFFECT, RevealEffect::new(cards)));
            }
        }
        if self.cfg.runaway_no.enabled {
            self.runaway = Some(Runaway::new(&self.cfg.runaway_no, self.rng.gen()));
        }

        let initial = self.flow.initial_from_hash(hash);
        self.later(INITIAL_SCROLL_DELAY_MS, move |app| app.scroll_to_scene(&initial));
        Ok(())
    }

    fn mount_chapters(&mut self, hash: &str) -> anyhow::Result<()> {
        let cfg = Rc::clone(&self.cfg);
        let chapters = self.plan.chapters(&cfg);

        if chapters.iter().any(|c| c.layout == Layout::Question) {
            let serious = cfg.allow_no && cfg.chase.show_serious_links;
            self.chase = Some(ChaseGame::new(
                &cfg.chase,
                ChaseHost::Chapter,
                cfg.allow_no,
                serious,
                self.reduced_motion,
                self.rng.gen(),
            ));
        }

        let search = self.window.location().search().unwrap_or_default();
        let gallery_override = location::gallery_override(&search);
        let opts = ChapterOptions {
            gallery_override,
            gallery_debug: gallery_override.is_some(),
            reveal_all: self.reduced_motion,
            taunt: self
                .chase
                .as_ref()
                .map(|c| c.taunt().to_string())
                .unwrap_or_default(),
        };
        let cta = match self.plan {
            Plan::Story => cfg.pages.story.as_ref().and_then(|s| s.cta.as_ref()),
            _ => None,
        };
        self.renderer
            .apply(&view::chapters_view(&cfg, &self.flow, chapters, cta, &opts)?)?;
        self.renderer
            .apply(&view::floats_view(&cfg, self.reduced_motion))?;

        if !self.reduced_motion {
            let effect = ProgressEffect::new(&self.document, chapters, &cfg.floating);
            self.driver.register(|t| t.replace(PROGRESS_EFFECT, effect));
        }

        let initial = self.flow.initial_from_hash(hash);
        self.later(INITIAL_SCROLL_DELAY_MS, move |app| app.scroll_to_chapter(&initial));
        Ok(())
    }

    fn mount_question_page(&mut self) -> anyhow::Result<()> {
        let cfg = Rc::clone(&self.cfg);
        let q = cfg.pages.question.clone().unwrap_or_default();
        let serious = cfg.allow_no && cfg.chase.show_serious_links;
        let chase = ChaseGame::new(
            &cfg.chase,
            ChaseHost::Page,
            cfg.allow_no,
            serious,
            self.reduced_motion,
            self.rng.gen(),
        );
        self.renderer
            .apply(&view::question_page(&cfg, &q, chase.taunt()))?;

        let confirm = ConfirmLoop::new(&q.no_confirm);
        self.set_button_scale(ids::CHASE_YES, confirm.yes_scale());
        self.chase = Some(chase);
        self.confirm = Some(confirm);
        self.question = Some(q);
        Ok(())
    }

    fn mount_response_page(&mut self, kind: Response) -> anyhow::Result<()> {
        let cfg = Rc::clone(&self.cfg);
        let Some(page) = response_of(&cfg, kind) else {
            return self.show_scene(kind.id());
        };
        self.renderer.apply(&view::response_page(&cfg, page))?;
        if page.confetti {
            self.burst_confetti();
        }
        Ok(())
    }

    pub fn handle(&mut self, msg: Msg) -> anyhow::Result<()> {
        log::debug!("[app] {:?}", msg);
        match msg {
            Msg::Activate { id, action } => {
                let transition = self.flow.activate(&id, action)?.clone();
                match (transition, self.plan) {
                    (Transition::Enter(to), Plan::ScrollStack) => {
                        self.scroll_to_scene(&to);
                        if self.plan.confetti_on(&self.cfg, &to) {
                            self.burst_confetti();
                        }
                    }
                    (Transition::Enter(to), _) => self.show_scene(&to)?,
                    (Transition::Open(href), _) => self.navigate(&href),
                    (Transition::Stay, Plan::ScrollStack) => self.replace_hash(&id),
                    (Transition::Stay, _) => {}
                }
            }
            Msg::ActivateChapter { id, action } => match self.flow.activate(&id, action)?.clone() {
                Transition::Enter(to) => {
                    self.scroll_to_chapter(&to);
                    if self.plan.confetti_on(&self.cfg, &to) {
                        self.burst_confetti();
                    }
                }
                Transition::Open(href) => self.navigate(&href),
                Transition::Stay => {}
            },
            Msg::Restart => self.show_scene(INTRO_ID)?,
            Msg::ScrollToScene(id) => self.scroll_to_scene(&id),
            Msg::ScrollToChapter(id) => self.scroll_to_chapter(&id),
            Msg::Open(href) => self.navigate(&href),
            Msg::ChaseClick(side) => self.chase_click(side),
            Msg::RunawayApproach => self.runaway_dodge(),
            Msg::SetGalleryVariant(variant) => {
                let loc = self.window.location();
                let search = loc.search().unwrap_or_default();
                let next = location::with_query_param(&search, location::GALLERY_PARAM, variant.as_str());
                loc.set_search(&next).map_err(dom::js_err)?;
            }
        }
        Ok(())
    }

    /// Pointer moved or pressed inside the chase zone.
    pub fn chase_pointer(&mut self, point: Vec2) {
        let Some(chase) = self.chase.as_mut() else {
            return;
        };
        let doc = &self.document;
        let Some(zone) = doc.get_element_by_id(ids::CHASE_ZONE) else {
            return;
        };
        let yes = doc.get_element_by_id(ids::CHASE_YES);
        let no = doc.get_element_by_id(ids::CHASE_NO);
        let geo = ZoneGeometry {
            zone: input::client_rect(&zone),
            yes: yes.as_ref().map(input::client_rect),
            no: no.as_ref().map(input::client_rect),
        };

        let dodges = chase.pointer(point, &geo);
        if dodges.is_empty() {
            return;
        }
        dom::set_text(doc, ids::CHASE_TAUNT, chase.taunt());

        let now = self.driver.now_ms();
        for d in dodges {
            let el = match d.side {
                Side::Yes => yes.clone(),
                Side::No => no.clone(),
            };
            let Some(el) = el else { continue };
            dom::set_style(&el, "left", &format!("{:.1}px", d.position.x));
            dom::set_style(&el, "top", &format!("{:.1}px", d.position.y));
            let key = kick_key(d.side.as_str());
            if d.gave_up {
                dom::set_style(&el, VAR_TX, "0px");
                dom::set_style(&el, VAR_TY, "0px");
                dom::set_class(&el, READY_CLASS, true);
                self.driver.register(|t| {
                    t.remove(&key);
                });
            } else {
                let effect = KickEffect::new(
                    el,
                    Kick {
                        vector: d.kick,
                        started_ms: now,
                    },
                );
                self.driver.register(|t| t.replace(key, effect));
            }
        }
    }

    fn chase_click(&mut self, side: Side) {
        let Some(chase) = self.chase.as_mut() else {
            return;
        };
        if chase.click(side) == ClickOutcome::Taunt {
            dom::set_text(&self.document, ids::CHASE_TAUNT, chase.taunt());
            return;
        }
        match (self.plan, side) {
            (Plan::QuestionPage, Side::Yes) => {
                if let Some(href) = self.question.as_ref().map(|q| q.yes_href.clone()) {
                    self.navigate(&href);
                }
            }
            (Plan::QuestionPage, Side::No) => self.confirm_no(),
            (_, side) => {
                self.scroll_to_chapter(side_id(side));
                if side == Side::Yes && self.plan.confetti_on(&self.cfg, YES_ID) {
                    self.burst_confetti();
                }
            }
        }
    }

    fn confirm_no(&mut self) {
        let Some(step) = self.confirm.as_mut().map(ConfirmLoop::on_no) else {
            return;
        };
        let no_href = self
            .question
            .as_ref()
            .map(|q| q.no_href.clone())
            .unwrap_or_default();
        match step {
            ConfirmStep::Prompt {
                text,
                yes_scale,
                no_scale,
                yes_label,
                no_label,
            } => {
                self.set_taunt(&text);
                self.set_button_scale(ids::CHASE_NO, no_scale);
                self.pop_yes(yes_scale);
                if let Some(label) = no_label {
                    dom::set_text(&self.document, ids::CHASE_NO, &label);
                }
                if let Some(label) = yes_label {
                    dom::set_text(&self.document, ids::CHASE_YES, &label);
                }
                if let Some(yes) = self.document.get_element_by_id(ids::CHASE_YES) {
                    dom::set_class(&yes, READY_CLASS, true);
                }
            }
            ConfirmStep::Leave { taunt, delay_ms } => {
                self.set_taunt(&taunt);
                self.later(delay_ms, move |app| app.navigate(&no_href));
            }
            ConfirmStep::Proceed => self.navigate(&no_href),
        }
    }

    fn pop_yes(&self, base: f32) {
        for (delay, scale) in pop_sequence(base) {
            if delay == 0 {
                self.set_button_scale(ids::CHASE_YES, scale);
            } else {
                self.later(delay, move |app| app.set_button_scale(ids::CHASE_YES, scale));
            }
        }
    }

    fn runaway_dodge(&mut self) {
        let vw = input::viewport(&self.window).x;
        let Some(jump) = self.runaway.as_mut().and_then(|r| r.dodge(vw)) else {
            return;
        };
        if let Some(btn) = self.document.get_element_by_id(ids::RUNAWAY_NO) {
            dom::set_style(&btn, VAR_TX, &px(jump.offset.x));
            dom::set_style(&btn, VAR_TY, &px(jump.offset.y));
        }
        if jump.scroll_by > 0.0 {
            dom::scroll_by(&self.window, jump.scroll_by);
        }
    }

    /// Lists fetched from text files, in load order.
    pub fn line_files(&self) -> Vec<(LineTarget, String)> {
        let mut out = Vec::new();
        if self.chase.is_some() {
            let c = &self.cfg.chase;
            for (target, file) in [
                (LineTarget::Taunts, &c.taunts_file),
                (LineTarget::YesTaunts, &c.yes_taunts_file),
                (LineTarget::NoTaunts, &c.no_taunts_file),
            ] {
                if let Some(path) = file.as_deref().filter(|p| !p.is_empty()) {
                    out.push((target, path.to_string()));
                }
            }
        }
        if self.confirm.is_some() {
            if let Some(path) = self
                .question
                .as_ref()
                .and_then(|q| q.no_confirm.prompts_file.as_deref())
                .filter(|p| !p.is_empty())
            {
                out.push((LineTarget::Prompts, path.to_string()));
            }
        }
        out
    }

    pub fn apply_lines(&mut self, target: LineTarget, lines: Vec<String>) -> bool {
        match target {
            LineTarget::Taunts => self
                .chase
                .as_mut()
                .is_some_and(|c| c.override_taunts(None, lines)),
            LineTarget::YesTaunts => self
                .chase
                .as_mut()
                .is_some_and(|c| c.override_taunts(Some(Side::Yes), lines)),
            LineTarget::NoTaunts => self
                .chase
                .as_mut()
                .is_some_and(|c| c.override_taunts(Some(Side::No), lines)),
            LineTarget::Prompts => self
                .confirm
                .as_mut()
                .is_some_and(|c| c.override_prompts(lines)),
        }
    }

    fn burst_confetti(&mut self) {
        if self.reduced_motion {
            return;
        }
        let viewport = input::viewport(&self.window);
        let burst = Burst::spawn(&mut self.rng, viewport, CONFETTI_COUNT);
        self.driver.register(|t| t.push(ConfettiEffect::new(burst)));
    }

    fn scroll_to_scene(&mut self, id: &str) {
        let Some(el) = self.document.get_element_by_id(&ids::scene(id)) else {
            return;
        };
        dom::scroll_into_view(&el, !self.reduced_motion);
        if self.flow.enter(id).is_ok() {
            self.replace_hash(id);
        }
    }

    fn scroll_to_chapter(&mut self, id: &str) {
        let Some(el) = self.document.get_element_by_id(&ids::chapter(id)) else {
            return;
        };
        dom::scroll_into_view(&el, !self.reduced_motion);
        if self.flow.enter(id).is_ok() {
            self.replace_hash(id);
        }
    }

    fn set_taunt(&mut self, text: &str) {
        if let Some(chase) = self.chase.as_mut() {
            chase.set_taunt(text);
        }
        dom::set_text(&self.document, ids::CHASE_TAUNT, text);
    }

    fn set_button_scale(&self, id: &str, scale: f32) {
        if let Some(el) = self.document.get_element_by_id(id) {
            dom::set_style(&el, VAR_SCALE, &scale.to_string());
        }
    }

    fn replace_hash(&self, id: &str) {
        let Ok(history) = self.window.history() else {
            return;
        };
        if let Err(e) = history.replace_state_with_url(&JsValue::from_str(id), "", Some(location::hash_for(id).as_str())) {
            log::debug!("[app] replaceState failed: {:?}", e);
        }
    }

    fn navigate(&self, href: &str) {
        log::info!("[app] navigating to {}", href);
        if let Err(e) = self.window.location().set_href(href) {
            log::warn!("[app] navigation to {} failed: {:?}", href, e);
        }
    }

    /// Run `f` against the app after `ms`, if it is still alive then.
    fn later(&self, ms: i32, f: impl FnOnce(&mut App) + 'static) {
        let weak = self.this.clone();
        dom::set_timeout(&self.window, ms, move || {
            if let Some(app) = weak.upgrade() {
                f(&mut app.borrow_mut());
            }
        });
    }
}
