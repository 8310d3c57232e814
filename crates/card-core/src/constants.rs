// Shared tuning constants for the card core.

// Well-known scene ids
pub const INTRO_ID: &str = "intro"; // initial scene and restart target
pub const QUESTION_ID: &str = "question";
pub const YES_ID: &str = "yes";
pub const NO_ID: &str = "no"; // target suppressed when `allowNo` is false

// Chapter tracks (vh units)
pub const TRACK_VH_DEFAULT: f32 = 160.0;
pub const TRACK_VH_MIN: f32 = 120.0;
pub const CTA_TRACK_VH: f32 = 120.0;

// Floating sprites (px)
pub const FLOAT_WIDTH_DEFAULT: f32 = 160.0;
pub const FLOAT_WIDTH_MIN: f32 = 60.0;

// Scroll-stack reveal: fraction of a card that must be on screen
pub const REVEAL_THRESHOLD: f32 = 0.18;

// Chase game
pub const CHASE_RADIUS_DEFAULT: f32 = 110.0; // px from button centre
pub const CHASE_RADIUS_MIN: f32 = 50.0;
pub const CHASE_DODGE_DEFAULT: f32 = 170.0; // max kick distance (px)
pub const CHASE_DODGE_MIN: f32 = 60.0;
pub const CHASE_DODGE_Y_RATIO: f32 = 0.55; // vertical kick relative to horizontal
pub const CHASE_ZONE_MARGIN: f32 = 18.0; // keep-out border inside the zone (px)
pub const KICK_DECAY_MS: f64 = 140.0; // kick offset reaches zero after this long

// Legacy runaway No button (scroll-stack mode)
pub const RUNAWAY_MAX_X_MIN: f32 = 60.0;
pub const RUNAWAY_MAX_X_MAX: f32 = 220.0;
pub const RUNAWAY_MAX_X_VIEWPORT_RATIO: f32 = 0.25;
pub const RUNAWAY_MAX_Y: f32 = 120.0;

// Confirm loop
pub const YES_SCALE_START_DEFAULT: f32 = 1.0;
pub const YES_SCALE_STEP_DEFAULT: f32 = 0.18;
pub const YES_SCALE_MAX: f32 = 3.0;
pub const NO_SCALE_STEP_DEFAULT: f32 = 0.08;
pub const NO_SCALE_MIN: f32 = 0.6;
pub const POP_UP_DELTA: f32 = 0.12; // bounce above base scale
pub const POP_DOWN_DELTA: f32 = 0.04; // settle below base scale
pub const POP_STEP_MS: i32 = 140;
pub const FINAL_NO_DELAY_MS: i32 = 450;

// Confetti
pub const CONFETTI_COUNT: usize = 170;
pub const CONFETTI_GRAVITY: f32 = 0.18; // px/frame^2
pub const CONFETTI_SPREAD_X: f32 = 140.0;
pub const CONFETTI_SPREAD_Y: f32 = 40.0;
pub const CONFETTI_TTL_MIN: f32 = 70.0; // frames
pub const CONFETTI_TTL_SPAN: f32 = 40.0;
pub const CONFETTI_COLORS: [&str; 5] = ["#ff3f84", "#7c3aed", "#22c55e", "#06b6d4", "#f59e0b"];
