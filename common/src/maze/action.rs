use super::Cell;

/// One reversible unit of generation work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// The wall between `from` and `to` was removed and `to` was visited and
    /// pushed onto the path.
    Forward { from: Cell, to: Cell },
    /// `cell` was popped off the path and finalized. The very first record of
    /// a run has this shape too: it stands for visiting the start cell.
    Backtrack { cell: Cell },
}

/// Undo and redo stacks. An action lives in exactly one of them at a time.
#[derive(Clone, Debug, Default)]
pub struct History {
    undo_stack: Vec<Action>,
    redo_stack: Vec<Action>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes freshly performed work. Any undone future is discarded.
    pub fn record(&mut self, action: Action) {
        self.undo_stack.push(action);
        self.redo_stack.clear();
    }

    /// Moves the most recent action onto the redo stack and returns it.
    pub fn undo(&mut self) -> Option<Action> {
        let action = self.undo_stack.pop()?;
        self.redo_stack.push(action);
        Some(action)
    }

    /// Moves the most recently undone action back onto the undo stack and
    /// returns it.
    pub fn redo(&mut self) -> Option<Action> {
        let action = self.redo_stack.pop()?;
        self.undo_stack.push(action);
        Some(action)
    }

    pub fn peek_redo(&self) -> Option<&Action> {
        self.redo_stack.last()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Oldest first.
    pub fn actions(&self) -> &[Action] {
        &self.undo_stack
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward(x: usize) -> Action {
        Action::Forward {
            from: Cell::new(x, 0),
            to: Cell::new(x + 1, 0),
        }
    }

    #[test]
    fn test_undo_and_redo_move_actions_between_stacks() {
        let mut history = History::new();
        history.record(forward(0));
        history.record(forward(1));

        assert_eq!(history.undo(), Some(forward(1)));
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.redo_len(), 1);
        assert_eq!(history.peek_redo(), Some(&forward(1)));

        assert_eq!(history.redo(), Some(forward(1)));
        assert_eq!(history.undo_len(), 2);
        assert!(!history.can_redo());
        assert_eq!(history.actions(), &[forward(0), forward(1)]);
    }

    #[test]
    fn test_exhausted_stacks_are_no_ops() {
        let mut history = History::new();

        assert!(!history.can_undo());
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
        assert_eq!(history.peek_redo(), None);
    }

    #[test]
    fn test_record_discards_undone_future() {
        let mut history = History::new();
        history.record(forward(0));
        history.record(forward(1));
        history.undo();
        history.undo();
        assert_eq!(history.redo_len(), 2);

        let backtrack = Action::Backtrack {
            cell: Cell::new(3, 3),
        };
        history.record(backtrack);

        assert!(!history.can_redo());
        assert_eq!(history.actions(), &[backtrack]);
    }

    #[test]
    fn test_clear_empties_both_stacks() {
        let mut history = History::new();
        history.record(forward(0));
        history.record(forward(1));
        history.undo();

        history.clear();

        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
