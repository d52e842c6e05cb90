#![forbid(unsafe_code)]

use std::fmt;

/// Lifecycle of an editor driver.
///
/// ```text
/// Uninitialized --initialize--> Initialized --edit--> Editing
///                                    ^                  |  ^
///                                    +---initialize-----+  +--edit
///                                    +---failed edit----+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DriverState {
    /// No editor tree has been bound.
    #[default]
    Uninitialized,
    /// An editor tree is bound but no model has been pushed into it.
    Initialized,
    /// A model is bound; `flush` is permitted.
    Editing,
}

impl DriverState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Initialized => "initialized",
            Self::Editing => "editing",
        }
    }
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
