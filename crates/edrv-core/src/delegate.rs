#![forbid(unsafe_code)]

use std::cell::Cell;
use std::rc::Rc;

/// Flags raised by delegates and read back by the owning driver.
///
/// One instance exists per driver initialization; delegates handed out
/// before a re-initialization keep the old instance and can no longer
/// reach the driver.
#[derive(Debug, Default)]
pub struct DriverSignals {
    dirty: Cell<bool>,
    flush_requested: Cell<bool>,
}

impl DriverSignals {
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    #[must_use]
    pub fn flush_requested(&self) -> bool {
        self.flush_requested.get()
    }

    /// Clear both flags.
    pub fn reset(&self) {
        self.dirty.set(false);
        self.flush_requested.set(false);
    }
}

/// Handle given to delegate-aware editors.
#[derive(Debug, Clone)]
pub struct EditorDelegate {
    path: String,
    signals: Rc<DriverSignals>,
}

impl EditorDelegate {
    #[must_use]
    pub fn new(path: impl Into<String>, signals: Rc<DriverSignals>) -> Self {
        Self {
            path: path.into(),
            signals,
        }
    }

    /// Property path of the editor, from the root of the model.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Ask the owning driver to flush.
    pub fn request_flush(&self) {
        self.signals.flush_requested.set(true);
    }

    /// Mark the editor as holding uncommitted changes (or not).
    pub fn set_dirty(&self, dirty: bool) {
        self.signals.dirty.set(dirty);
    }
}
