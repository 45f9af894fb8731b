use crate::action::GameAction;
use crate::history::PatchLog;
use crate::patch::{apply_patches, Change, Patch};
use crate::state::{Game, Root};

/// Whether an application is recorded in the patch log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyMode {
    Normal,
    /// Undo/redo replay; never recorded.
    Replay,
}

/// The Root plus its patch log. All game writes go through here.
#[derive(Clone, Debug, Default)]
pub struct GameStore {
    root: Root,
    log: PatchLog,
}

impl GameStore {
    pub fn new(root: Root) -> Self {
        Self {
            root,
            log: PatchLog::new(),
        }
    }

    /// Keeps at most `limit` undo entries.
    pub fn with_history_limit(root: Root, limit: usize) -> Self {
        Self {
            root,
            log: PatchLog::with_limit(limit),
        }
    }

    pub fn root(&self) -> &Root {
        &self.root
    }

    pub fn game(&self) -> &Game {
        &self.root.game
    }

    pub fn log(&self) -> &PatchLog {
        &self.log
    }

    /// Runs `action` atomically. Returns the recorded change, or `None` when the
    /// action was a no-op.
    pub fn dispatch(&mut self, action: &GameAction) -> Option<Change> {
        let patches = action.plan(&self.root.game);
        self.apply(patches, ApplyMode::Normal)
    }

    pub fn apply(&mut self, patches: Vec<Patch>, mode: ApplyMode) -> Option<Change> {
        if patches.is_empty() {
            return None;
        }
        let inverse = apply_patches(&mut self.root.game, &patches)?;
        let change = Change {
            forward: patches,
            inverse,
        };
        if mode == ApplyMode::Normal {
            self.log.record(change.clone());
        }
        Some(change)
    }

    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.log.pop_undo() else {
            return false;
        };
        if self.apply(entry.inverse.clone(), ApplyMode::Replay).is_none() {
            self.log.push_undo(entry);
            return false;
        }
        self.log.push_redo(entry);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.log.pop_redo() else {
            return false;
        };
        if self.apply(entry.forward.clone(), ApplyMode::Replay).is_none() {
            self.log.push_redo(entry);
            return false;
        }
        self.log.push_undo(entry);
        true
    }
}
