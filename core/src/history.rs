use serde::{Deserialize, Serialize};

use crate::patch::{Change, Patch};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub seq: u64,
    pub forward: Vec<Patch>,
    pub inverse: Vec<Patch>,
    /// `seq` of the undo tip this entry was stacked on.
    pub previous_tip: Option<u64>,
}

/// Undo and redo stacks of recorded changes.
///
/// Every shuffle point is its own entry, so a long session grows the undo
/// stack quickly. With a limit set, the oldest entries fall off the bottom.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchLog {
    undo: Vec<HistoryEntry>,
    redo: Vec<HistoryEntry>,
    next_seq: u64,
    limit: Option<usize>,
}

impl PatchLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::default()
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Records a fresh forward change. Drops the redo branch.
    pub fn record(&mut self, change: Change) -> &HistoryEntry {
        self.redo.clear();
        let previous_tip = self.undo.last().map(|entry| entry.seq);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.undo.push(HistoryEntry {
            seq,
            forward: change.forward,
            inverse: change.inverse,
            previous_tip,
        });
        if let Some(limit) = self.limit {
            let overflow = self.undo.len().saturating_sub(limit);
            self.undo.drain(..overflow);
        }
        &self.undo[self.undo.len() - 1]
    }

    pub(crate) fn pop_undo(&mut self) -> Option<HistoryEntry> {
        self.undo.pop()
    }

    pub(crate) fn pop_redo(&mut self) -> Option<HistoryEntry> {
        self.redo.pop()
    }

    pub(crate) fn push_undo(&mut self, entry: HistoryEntry) {
        self.undo.push(entry);
    }

    pub(crate) fn push_redo(&mut self, entry: HistoryEntry) {
        self.redo.push(entry);
    }

    pub fn undo_tip(&self) -> Option<&HistoryEntry> {
        self.undo.last()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(card: u32) -> Change {
        Change {
            forward: vec![Patch::SetDrawnCard(Some(card))],
            inverse: vec![Patch::SetDrawnCard(None)],
        }
    }

    #[test]
    fn record_links_previous_tip() {
        let mut log = PatchLog::new();
        let first = log.record(change(1)).seq;
        let second = log.record(change(2));
        assert_eq!(second.previous_tip, Some(first));
        assert_eq!(log.undo_len(), 2);
    }

    #[test]
    fn record_clears_redo_branch() {
        let mut log = PatchLog::new();
        log.record(change(1));
        let entry = log.pop_undo().expect("entry");
        log.push_redo(entry);
        assert!(log.can_redo());
        log.record(change(2));
        assert!(!log.can_redo());
        assert_eq!(log.undo_len(), 1);
    }

    #[test]
    fn limited_log_drops_oldest_entries() {
        let mut log = PatchLog::with_limit(2);
        let first = log.record(change(1)).seq;
        let second = log.record(change(2)).seq;
        let third = log.record(change(3)).seq;
        assert_eq!(log.undo_len(), 2);
        assert_eq!(log.undo_tip().map(|entry| entry.seq), Some(third));
        let tip = log.pop_undo().expect("tip");
        assert_eq!(tip.previous_tip, Some(second));
        let bottom = log.pop_undo().expect("bottom");
        assert_eq!(bottom.seq, second);
        assert_eq!(bottom.previous_tip, Some(first));
        assert!(log.pop_undo().is_none());
    }
}
