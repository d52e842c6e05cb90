#![forbid(unsafe_code)]

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::editor::Editor;

bitflags! {
    /// Capabilities an editor may provide, in any combination.
    ///
    /// Plans record the capabilities a slot is *declared* with; the driver
    /// computes the capabilities an instance *actually* has with
    /// [`Capabilities::of`] on every visit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Capabilities: u8 {
        /// Has pathed sub-editor slots.
        const COMPOSITE   = 0b0000_0001;
        /// Exposes `get_value`/`set_value` and is never descended into.
        const LEAF_VALUE  = 0b0000_0010;
        /// Receives the raw sub-model and commits its own children on flush.
        const VALUE_AWARE = 0b0000_0100;
        /// Accepts an editor delegate.
        const DELEGATE    = 0b0000_1000;
        /// Wraps an inner editor.
        const IS_EDITOR   = 0b0001_0000;
        /// Tracks presence of its sub-model itself.
        const OPTIONAL    = 0b0010_0000;
        /// Synchronises sub-editors with an ordered collection.
        const LIST        = 0b0100_0000;
    }
}

impl Capabilities {
    /// Capabilities that change how values move, and so must be present on
    /// the runtime instance whenever a plan declares them.
    pub const REQUIRED_AT_RUNTIME: Self = Self::LEAF_VALUE
        .union(Self::OPTIONAL)
        .union(Self::LIST);

    /// Query the runtime capabilities of `editor`.
    ///
    /// `COMPOSITE` is a plan-level notion and is never reported here.
    #[must_use]
    pub fn of(editor: &mut dyn Editor) -> Self {
        let mut caps = Self::empty();
        caps.set(Self::LEAF_VALUE, editor.as_leaf().is_some());
        caps.set(Self::VALUE_AWARE, editor.as_value_aware().is_some());
        caps.set(Self::DELEGATE, editor.as_delegate_aware().is_some());
        caps.set(Self::IS_EDITOR, editor.as_is_editor().is_some());
        caps.set(Self::OPTIONAL, editor.as_optional().is_some());
        caps.set(Self::LIST, editor.as_list().is_some());
        caps
    }
}
