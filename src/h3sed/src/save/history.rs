//! Undo and redo of hero edits

use super::{SaveError, Savefile};
use crate::hero::HeroState;

const DEFAULT_LIMIT: usize = 100;

/// One applied change to a hero, with the states on either side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub hero: usize,
    pub label: String,
    pub before: HeroState,
    pub after: HeroState,
}

impl Edit {
    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }
}

/// Bounded undo/redo stacks of hero edits
#[derive(Debug, Clone)]
pub struct History {
    undo: Vec<Edit>,
    redo: Vec<Edit>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        History::new(DEFAULT_LIMIT)
    }
}

impl History {
    pub fn new(limit: usize) -> Self {
        History {
            undo: Vec::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record an applied edit; clears the redo stack
    pub fn record(&mut self, edit: Edit) {
        if edit.is_noop() {
            return;
        }
        self.redo.clear();
        self.undo.push(edit);
        if self.undo.len() > self.limit {
            self.undo.remove(0);
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Revert the last edit, returning its label
    pub fn undo(&mut self, savefile: &mut Savefile) -> Result<Option<String>, SaveError> {
        let Some(edit) = self.undo.pop() else {
            return Ok(None);
        };
        savefile.restore_hero_state(edit.hero, edit.before.clone())?;
        let label = edit.label.clone();
        self.redo.push(edit);
        Ok(Some(label))
    }

    /// Re-apply the last undone edit, returning its label
    pub fn redo(&mut self, savefile: &mut Savefile) -> Result<Option<String>, SaveError> {
        let Some(edit) = self.redo.pop() else {
            return Ok(None);
        };
        savefile.restore_hero_state(edit.hero, edit.after.clone())?;
        let label = edit.label.clone();
        self.undo.push(edit);
        Ok(Some(label))
    }
}
