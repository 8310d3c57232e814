//! Platform-independent logic for the greeting card: config model, scene
//! flow, the chase mini-game, scroll progress math, confetti physics and the
//! declarative views the web crate mounts.

pub mod chase;
pub mod config;
pub mod confetti;
pub mod constants;
pub mod error;
pub mod flow;
pub mod lines;
pub mod location;
pub mod page;
pub mod progress;
pub mod ticker;
pub mod view;

pub use chase::{ChaseGame, ChaseHost, ConfirmLoop, ConfirmStep, Runaway, Side};
pub use config::CardConfig;
pub use confetti::Burst;
pub use error::{CardError, Result};
pub use flow::{Flow, Transition};
pub use lines::LineDeck;
pub use page::{PageKind, Plan, Response};
pub use ticker::{Effect, EffectStatus, Frame, Ticker};
