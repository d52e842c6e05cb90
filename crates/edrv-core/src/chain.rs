#![forbid(unsafe_code)]

//! Attachment of runtime-created sub-editors.
//!
//! List and optional editors create their children after the driver has
//! been initialized, so those children cannot be part of the driver's
//! static tree. Instead the driver hands such editors an [`EditorChain`]:
//! a factory that binds a fresh sub-editor to the element plan and yields
//! a [`BoundEditor`], a small driver dedicated to that one sub-editor.

use edrv_model::Value;

use crate::editor::EditorRef;
use crate::error::Result;

pub trait EditorChain {
    /// Capture `editor`'s sub-editor tree according to the element plan.
    fn bind(&self, editor: EditorRef) -> Box<dyn BoundEditor>;
}

pub trait BoundEditor {
    /// Push `value` into the sub-editor tree.
    fn edit(&mut self, value: Value) -> Result<()>;

    /// Flush the sub-editor tree. Returns the editor's value when it is a
    /// leaf, otherwise the element last passed to [`edit`](Self::edit).
    fn flush(&mut self) -> Result<Value>;
}
