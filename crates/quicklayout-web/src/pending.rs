//! Replaceable one-shot action behind a long-lived timer callback.

use std::cell::RefCell;
use std::rc::Rc;

type Action = Box<dyn FnOnce()>;

/// Holds at most one queued action. Replacing or clearing it drops the
/// previous action together with everything it captured.
#[derive(Clone, Default)]
pub struct PendingAction {
    slot: Rc<RefCell<Option<Action>>>,
}

impl PendingAction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action`, dropping any action queued before it.
    pub fn set<F>(&self, action: F)
    where
        F: FnOnce() + 'static,
    {
        let previous = self.slot.borrow_mut().replace(Box::new(action));
        drop(previous);
    }

    pub fn clear(&self) {
        let previous = self.slot.borrow_mut().take();
        drop(previous);
    }

    pub fn is_set(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Run the queued action, if any. The slot is already empty while the
    /// action runs, so it may queue a successor.
    pub fn run(&self) -> bool {
        let action = self.slot.borrow_mut().take();
        match action {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }
}
