// DOM hooks and timing used by the web front-end.
// Plain values only, so the host tests can include this file directly.

// Element carrying the JSON card description
pub const CONFIG_SCRIPT_ID: &str = "card-config";
pub const CONFETTI_CANVAS_ID: &str = "confetti";

// `<body data-page="...">` selects the page renderer
pub const PAGE_ATTR: &str = "data-page";

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

// Classes toggled at runtime
pub const VISIBLE_CLASS: &str = "isVisible";
pub const REVEALED_CLASS: &str = "isRevealed";
pub const READY_CLASS: &str = "isReady";

// CSS custom properties read by the stylesheet
pub const VAR_TX: &str = "--tx";
pub const VAR_TY: &str = "--ty";
pub const VAR_SCALE: &str = "--scale";

// Ticker keys for effects that must not run twice
pub const PROGRESS_EFFECT: &str = "progress";
pub const REVEAL_EFFECT: &str = "reveal";
pub const KICK_EFFECT_PREFIX: &str = "kick-";

// Hash jump waits one task so the freshly mounted tracks have a layout
pub const INITIAL_SCROLL_DELAY_MS: i32 = 0;

// Confetti canvas resolution never drops below 1 device pixel per CSS pixel
pub const MIN_DPR: f64 = 1.0;

pub fn kick_key(side: &str) -> String {
    format!("{KICK_EFFECT_PREFIX}{side}")
}

/// CSS pixel length, rounded the way the stylesheet expects.
pub fn px(v: f32) -> String {
    format!("{v:.0}px")
}
