#![forbid(unsafe_code)]

//! Editor capability traits.
//!
//! # Design
//!
//! Capabilities are orthogonal: an editor may be a leaf *and* value-aware
//! *and* delegate-aware at once. Rather than a type hierarchy, [`Editor`]
//! exposes one accessor per capability, each returning `None` by default.
//! An editor opts in by overriding the accessor to return `Some(self)`:
//!
//! ```ignore
//! impl Editor for NameEditor {
//!     fn as_leaf(&mut self) -> Option<&mut dyn LeafValueEditor> {
//!         Some(self)
//!     }
//! }
//! ```
//!
//! Editors are shared through `Rc<RefCell<..>>` handles so that the code
//! owning an editor tree and the driver bound to it observe the same
//! instances.

use std::cell::RefCell;
use std::rc::Rc;

use edrv_model::{ListRef, Value};

use crate::chain::EditorChain;
use crate::delegate::EditorDelegate;
use crate::error::Result;

/// Type-erased shared editor handle.
pub type EditorRef = Rc<RefCell<dyn Editor>>;

/// Move `editor` into a shared handle.
#[must_use]
pub fn shared<E: Editor>(editor: E) -> Rc<RefCell<E>> {
    Rc::new(RefCell::new(editor))
}

/// Erase the concrete type of a shared editor handle.
#[must_use]
pub fn editor_ref<E: Editor>(editor: &Rc<RefCell<E>>) -> EditorRef {
    editor.clone()
}

/// An element of an editor tree.
pub trait Editor: 'static {
    /// The editor currently held in the slot named `field`, if any.
    ///
    /// Drivers capture slots once, when they are initialized; reassigning
    /// a slot afterwards has no effect until the next `initialize`.
    fn sub_editor(&self, field: &str) -> Option<EditorRef> {
        let _ = field;
        None
    }

    fn as_leaf(&mut self) -> Option<&mut dyn LeafValueEditor> {
        None
    }

    fn as_value_aware(&mut self) -> Option<&mut dyn ValueAwareEditor> {
        None
    }

    fn as_delegate_aware(&mut self) -> Option<&mut dyn HasEditorDelegate> {
        None
    }

    /// The inner editor this object stands for. When the object also
    /// provides capabilities of its own it is bound first and the inner
    /// editor is bound as a co-editor at the same path.
    fn as_is_editor(&self) -> Option<EditorRef> {
        None
    }

    fn as_list(&mut self) -> Option<&mut dyn ListBinding> {
        None
    }

    fn as_optional(&mut self) -> Option<&mut dyn OptionalField> {
        None
    }
}

/// An editor bound directly to a value. Its sub-editors, if it has any,
/// are never visited by the driver.
pub trait LeafValueEditor {
    fn get_value(&self) -> Value;

    fn set_value(&mut self, value: Value);
}

/// An editor that receives its whole sub-model and is told when to commit.
pub trait ValueAwareEditor {
    fn set_value(&mut self, value: Value);

    /// Called after all sub-editors have been flushed.
    fn flush(&mut self);
}

pub trait HasEditorDelegate {
    fn set_delegate(&mut self, delegate: EditorDelegate);
}

/// An editor whose sub-editors are created at runtime and attached through
/// a driver-supplied [`EditorChain`].
pub trait ChainedEditor {
    /// Installed by the driver on `initialize`.
    fn set_editor_chain(&mut self, chain: Rc<dyn EditorChain>);

    /// Flush attached sub-editors and return the value to write back.
    fn flush_chain(&mut self) -> Result<Value>;
}

/// Keeps one sub-editor per element of an ordered collection.
pub trait ListBinding: ChainedEditor {
    /// Synchronise sub-editors with `backing`; `None` detaches them all.
    fn reconcile(&mut self, backing: Option<ListRef>) -> Result<()>;
}

/// Wraps a sub-editor that is only attached while its sub-model exists.
pub trait OptionalField: ChainedEditor {
    fn set_optional(&mut self, value: Option<Value>) -> Result<()>;

    fn is_present(&self) -> bool;
}
