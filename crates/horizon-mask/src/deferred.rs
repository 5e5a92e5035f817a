//! Work deferred to the host's next tick.
//!
//! Some platforms reset the caret asynchronously after the value changes.
//! Caret placements are therefore queued for a second application, which
//! the host runs on its next animation frame or macrotask.

use std::collections::VecDeque;

use horizon_mask_core::Selection;

/// A deferred action against the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Deferred {
    /// Put the selection back, unless it is already there.
    RestoreSelection(Selection),
}

/// FIFO queue of deferred tasks.
#[derive(Debug, Default)]
pub(crate) struct DeferredQueue {
    tasks: VecDeque<Deferred>,
}

impl DeferredQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn post(&mut self, task: Deferred) {
        self.tasks.push_back(task);
    }

    pub(crate) fn has_pending(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Remove and return every pending task in posting order.
    pub(crate) fn take_all(&mut self) -> Vec<Deferred> {
        self.tasks.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_and_take() {
        let mut queue = DeferredQueue::new();
        assert!(!queue.has_pending());

        queue.post(Deferred::RestoreSelection(Selection::caret(1)));
        queue.post(Deferred::RestoreSelection(Selection::caret(2)));
        assert!(queue.has_pending());

        assert_eq!(
            queue.take_all(),
            vec![
                Deferred::RestoreSelection(Selection::caret(1)),
                Deferred::RestoreSelection(Selection::caret(2)),
            ]
        );
        assert!(!queue.has_pending());
        assert!(queue.take_all().is_empty());
    }
}
