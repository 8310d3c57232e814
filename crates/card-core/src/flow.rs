//! Scene navigation as an explicit state machine.
//!
//! States are scene (or chapter) ids, transitions are action activations.
//! The table is built once from the config. With `allowNo = false` the
//! question entry's action targeting `no` never enters it, so it can be
//! neither rendered nor activated; links to `no` elsewhere stay.

use crate::config::{CardConfig, ClickHook, Scene};
use crate::constants::{INTRO_ID, NO_ID, QUESTION_ID};
use crate::error::{CardError, Result};
use crate::location;
use fnv::FnvHashMap;
use smallvec::SmallVec;

/// Outcome of activating an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Move to another entry of the same collection.
    Enter(String),
    /// Leave the card for an external (or sibling page) link.
    Open(String),
    /// The action has neither a target nor a link.
    Stay,
}

type Row = SmallVec<[(usize, Transition); 4]>;

#[derive(Clone, Debug)]
pub struct Flow {
    ids: Vec<String>,
    index: FnvHashMap<String, usize>,
    table: Vec<Row>,
    current: String,
}

impl Flow {
    pub fn new<'a>(entries: impl IntoIterator<Item = &'a Scene>, allow_no: bool) -> Self {
        let mut ids = Vec::new();
        let mut index = FnvHashMap::default();
        let mut table = Vec::new();
        for scene in entries {
            index.insert(scene.id.clone(), ids.len());
            ids.push(scene.id.clone());
            let row: Row = scene
                .actions
                .iter()
                .enumerate()
                .filter(|(_, a)| allow_no || scene.id != QUESTION_ID || !a.targets(NO_ID))
                .map(|(i, a)| {
                    let t = match (a.on_click, a.to.as_ref(), a.href.as_ref()) {
                        (Some(ClickHook::Restart), _, _) => Transition::Enter(INTRO_ID.to_string()),
                        (_, Some(to), _) => Transition::Enter(to.clone()),
                        (_, None, Some(href)) => Transition::Open(href.clone()),
                        _ => Transition::Stay,
                    };
                    (i, t)
                })
                .collect();
            table.push(row);
        }
        Self {
            ids,
            index,
            table,
            current: INTRO_ID.to_string(),
        }
    }

    pub fn for_scenes(cfg: &CardConfig) -> Self {
        Self::new(cfg.scenes.iter(), cfg.allow_no)
    }

    pub fn for_chapters(cfg: &CardConfig) -> Self {
        Self::new(cfg.chapters.iter().map(|c| &c.content), cfg.allow_no)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Position of `id` in the collection the flow was built from.
    pub fn position(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| CardError::UnknownScene(id.to_string()))
    }

    /// Initial state: the hash id if it names a known entry, else `intro`.
    pub fn initial_from_hash(&self, hash: &str) -> String {
        location::id_from_hash(hash)
            .filter(|id| self.contains(id))
            .unwrap_or_else(|| INTRO_ID.to_string())
    }

    /// Indices (into the entry's `actions`) that survive filtering.
    pub fn visible_actions(&self, id: &str) -> Result<impl Iterator<Item = usize> + '_> {
        let pos = self.position(id)?;
        Ok(self.table[pos].iter().map(|(i, _)| *i))
    }

    pub fn activate(&self, id: &str, action: usize) -> Result<&Transition> {
        let pos = self.position(id)?;
        self.table[pos]
            .iter()
            .find(|(i, _)| *i == action)
            .map(|(_, t)| t)
            .ok_or_else(|| CardError::UnknownAction {
                scene: id.to_string(),
                index: action,
            })
    }

    pub fn enter(&mut self, id: &str) -> Result<()> {
        self.position(id)?;
        log::debug!("[flow] {} -> {}", self.current, id);
        self.current = id.to_string();
        Ok(())
    }

    pub fn current(&self) -> &str {
        &self.current
    }
}
