// linear undo/redo over whole records
use std::collections::VecDeque;

/// Past / present / future triple. A new edit after an undo drops the future for good.
#[derive(Debug, Clone, PartialEq)]
pub struct History<T> {
    past: Vec<T>,
    present: T,
    future: VecDeque<T>,
}

impl<T: Clone + PartialEq> History<T> {
    pub fn new(initial: T) -> Self {
        Self {
            past: Vec::new(),
            present: initial,
            future: VecDeque::new(),
        }
    }

    pub fn present(&self) -> &T {
        &self.present
    }

    /// Replaces the present. Returns false, recording nothing, when `next` equals the present.
    pub fn set(&mut self, next: T) -> bool {
        if next == self.present {
            return false;
        }
        let previous = std::mem::replace(&mut self.present, next);
        self.past.push(previous);
        self.future.clear();
        true
    }

    pub fn update(&mut self, updater: impl FnOnce(&T) -> T) -> bool {
        let next = updater(&self.present);
        self.set(next)
    }

    /// Replaces the present without recording a step, folding `next` into the
    /// last edit. Used while a continuous edit such as a slider drag is in progress.
    pub fn amend(&mut self, next: T) -> bool {
        if next == self.present {
            return false;
        }
        self.present = next;
        self.future.clear();
        true
    }

    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_set_is_a_no_op() {
        let mut history = History::new(1);
        assert!(!history.set(1));
        assert!(!history.can_undo());
        assert!(history.set(2));
        assert_eq!(history.past_len(), 1);
    }

    #[test]
    fn undo_redo_walk_the_stack() {
        let mut history = History::new("a");
        history.set("b");
        history.set("c");

        assert!(history.undo());
        assert_eq!(*history.present(), "b");
        assert!(history.undo());
        assert_eq!(*history.present(), "a");
        assert!(!history.undo());

        assert!(history.redo());
        assert_eq!(*history.present(), "b");
        assert!(history.redo());
        assert_eq!(*history.present(), "c");
        assert!(!history.redo());
    }

    #[test]
    fn edit_after_undo_discards_future() {
        let mut history = History::new(0);
        history.set(1);
        history.set(2);
        history.undo();
        history.undo();
        assert_eq!(history.future_len(), 2);

        history.update(|v| v + 10);
        assert_eq!(*history.present(), 10);
        assert!(!history.can_redo());
        assert_eq!(history.past_len(), 1);
    }

    #[test]
    fn amended_edits_share_one_step() {
        let mut history = History::new(140);
        assert!(history.set(141));
        for width in 142..=200 {
            assert!(history.amend(width));
        }
        assert!(!history.amend(200));
        assert_eq!(history.past_len(), 1);
        assert_eq!(*history.present(), 200);

        assert!(history.undo());
        assert_eq!(*history.present(), 140);
        assert!(!history.can_undo());
    }
}
