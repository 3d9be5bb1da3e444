//! Save lifecycle state machine

use serde::Serialize;
use std::fmt;

/// Persistence state of an open page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SaveState {
    /// Persisted state equals in-memory state
    #[default]
    Clean,
    /// Edited, not yet persisted
    Dirty,
    /// A save is in flight
    Saving,
    /// The last save errored; edits are kept
    SaveFailed,
}

impl SaveState {
    /// State after an in-memory mutation. Mutations during a save are
    /// buffered, so `Saving` is kept.
    pub fn on_mutation(self) -> SaveState {
        match self {
            SaveState::Saving => SaveState::Saving,
            SaveState::Clean | SaveState::Dirty | SaveState::SaveFailed => SaveState::Dirty,
        }
    }

    /// Whether a save may start from this state
    pub fn can_save(self) -> bool {
        matches!(self, SaveState::Dirty | SaveState::SaveFailed)
    }

    /// State after the in-flight save resolves.
    ///
    /// A mutation buffered during the save makes the page dirty again
    /// regardless of the outcome.
    pub fn on_save_finished(self, succeeded: bool, buffered: bool) -> SaveState {
        debug_assert_eq!(self, SaveState::Saving);
        match (buffered, succeeded) {
            (true, _) => SaveState::Dirty,
            (false, true) => SaveState::Clean,
            (false, false) => SaveState::SaveFailed,
        }
    }

    /// Holds edits that are not persisted
    pub fn has_unsaved_changes(self) -> bool {
        !matches!(self, SaveState::Clean)
    }
}

impl fmt::Display for SaveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SaveState::Clean => "clean",
            SaveState::Dirty => "dirty",
            SaveState::Saving => "saving",
            SaveState::SaveFailed => "save_failed",
        };
        f.write_str(s)
    }
}

/// Snapshot published to state subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ComposerStatus {
    pub state: SaveState,
    /// Bumped by every accepted mutation
    pub revision: u64,
    /// Revision of the last successful save
    pub saved_revision: u64,
    pub last_error: Option<String>,
}

/// Result of a manual save request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The snapshot at `revision` was persisted
    Saved { revision: u64 },
    /// Nothing to save
    UpToDate,
    /// Another save is running; edits made since will follow it
    InFlight,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_transitions() {
        assert_eq!(SaveState::Clean.on_mutation(), SaveState::Dirty);
        assert_eq!(SaveState::Dirty.on_mutation(), SaveState::Dirty);
        assert_eq!(SaveState::SaveFailed.on_mutation(), SaveState::Dirty);
        assert_eq!(SaveState::Saving.on_mutation(), SaveState::Saving);
    }

    #[test]
    fn test_save_finished() {
        assert_eq!(SaveState::Saving.on_save_finished(true, false), SaveState::Clean);
        assert_eq!(SaveState::Saving.on_save_finished(false, false), SaveState::SaveFailed);
        assert_eq!(SaveState::Saving.on_save_finished(true, true), SaveState::Dirty);
        assert_eq!(SaveState::Saving.on_save_finished(false, true), SaveState::Dirty);
    }

    #[test]
    fn test_can_save() {
        assert!(SaveState::Dirty.can_save());
        assert!(SaveState::SaveFailed.can_save());
        assert!(!SaveState::Clean.can_save());
        assert!(!SaveState::Saving.can_save());
        assert!(SaveState::SaveFailed.has_unsaved_changes());
    }
}
