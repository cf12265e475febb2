//! Profile form with reset history

use super::ProfileField;
use crate::storage::ProfileSnapshot;

/// Current profile text plus the snapshots a reset threw away
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub snapshot: ProfileSnapshot,
    history: Vec<ProfileSnapshot>,
}

impl ProfileForm {
    pub fn new(snapshot: ProfileSnapshot) -> Self {
        ProfileForm {
            snapshot,
            history: Vec::new(),
        }
    }

    pub fn get(&self, field: ProfileField) -> &str {
        self.snapshot.get(field)
    }

    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        self.snapshot.set(field, value);
    }

    /// Remember the current text and blank every field
    pub fn reset(&mut self) {
        let previous = std::mem::take(&mut self.snapshot);
        self.history.push(previous);
    }

    /// Restore the text from before the last reset
    ///
    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.snapshot = previous;
                true
            }
            None => false,
        }
    }

    /// Replace the whole form, keeping the previous text undoable
    pub fn replace(&mut self, snapshot: ProfileSnapshot) {
        let previous = std::mem::replace(&mut self.snapshot, snapshot);
        self.history.push(previous);
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_then_undo() {
        let mut form = ProfileForm::default();
        form.set(ProfileField::Name, "Zephyr");
        form.set(ProfileField::Total, "300");
        let before = form.snapshot.clone();

        form.reset();
        assert_eq!(form.get(ProfileField::Name), "");
        assert!(form.can_undo());

        assert!(form.undo());
        assert_eq!(form.snapshot, before);
        assert!(!form.can_undo());
    }

    #[test]
    fn test_undo_empty_is_noop() {
        let mut form = ProfileForm::default();
        form.set(ProfileField::Name, "Darius");
        assert!(!form.undo());
        assert_eq!(form.get(ProfileField::Name), "Darius");
    }

    #[test]
    fn test_multiple_resets_stack() {
        let mut form = ProfileForm::default();
        form.set(ProfileField::Name, "first");
        form.reset();
        form.set(ProfileField::Name, "second");
        form.reset();

        form.undo();
        assert_eq!(form.get(ProfileField::Name), "second");
        form.undo();
        assert_eq!(form.get(ProfileField::Name), "first");
    }
}
