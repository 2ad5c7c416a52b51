use std::cell::Cell;
use std::rc::Rc;

/// Shared stop flag for perpetual loops.
///
/// Clones observe the same flag. Cancelling is idempotent and cannot be
/// undone; anything already queued checks the flag before doing work.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}
