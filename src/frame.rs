use card_core::ticker::{Frame, Ticker};
use glam::Vec2;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Canvas the confetti bursts draw into.
pub struct ConfettiLayer {
    pub canvas: web::HtmlCanvasElement,
    pub ctx: web::CanvasRenderingContext2d,
    cleared_frame: Option<u64>,
}

impl ConfettiLayer {
    pub fn new(canvas: web::HtmlCanvasElement, ctx: web::CanvasRenderingContext2d) -> Self {
        Self {
            canvas,
            ctx,
            cleared_frame: None,
        }
    }

    /// Clear at most once per frame so overlapping bursts share the canvas.
    pub fn begin(&mut self, frame: &Frame, viewport: Vec2) {
        if self.cleared_frame != Some(frame.index) {
            self.ctx
                .clear_rect(0.0, 0.0, viewport.x as f64, viewport.y as f64);
            self.cleared_frame = Some(frame.index);
        }
    }
}

/// Everything an effect may touch during a frame.
pub struct Stage {
    pub window: web::Window,
    pub confetti: Option<ConfettiLayer>,
}

struct Animator {
    ticker: Ticker<Stage>,
    stage: Stage,
    started: Instant,
    running: bool,
}

impl Animator {
    fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    fn frame(&mut self) -> bool {
        let now = self.now_ms();
        let Self { ticker, stage, .. } = self;
        ticker.tick(stage, now)
    }
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Owns the ticker and the requestAnimationFrame loop driving it. Frames are
/// only requested while at least one effect is registered.
#[derive(Clone)]
pub struct Driver {
    anim: Rc<RefCell<Animator>>,
    tick: TickClosure,
}

impl Driver {
    pub fn new(stage: Stage) -> Self {
        let anim = Rc::new(RefCell::new(Animator {
            ticker: Ticker::new(),
            stage,
            started: Instant::now(),
            running: false,
        }));
        let tick = start_loop(anim.clone());
        Self { anim, tick }
    }

    /// Milliseconds on the same clock the effects see.
    pub fn now_ms(&self) -> f64 {
        self.anim.borrow().now_ms()
    }

    /// Register or remove effects, then make sure frames are flowing.
    pub fn register(&self, f: impl FnOnce(&mut Ticker<Stage>)) {
        f(&mut self.anim.borrow_mut().ticker);
        self.ensure_running();
    }

    pub fn with_stage<R>(&self, f: impl FnOnce(&mut Stage) -> R) -> R {
        f(&mut self.anim.borrow_mut().stage)
    }

    fn ensure_running(&self) {
        {
            let mut a = self.anim.borrow_mut();
            if a.running || a.ticker.is_idle() {
                return;
            }
            a.running = true;
        }
        request_frame(&self.tick);
    }
}

fn request_frame(tick: &TickClosure) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn start_loop(anim: Rc<RefCell<Animator>>) -> TickClosure {
    let tick: TickClosure = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let more = anim.borrow_mut().frame();
        if more {
            request_frame(&tick_clone);
        } else {
            anim.borrow_mut().running = false;
        }
    }) as Box<dyn FnMut()>));
    tick
}
