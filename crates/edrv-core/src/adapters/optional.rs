#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use edrv_model::Value;
use tracing::trace;

use crate::chain::{BoundEditor, EditorChain};
use crate::editor::{ChainedEditor, Editor, OptionalField, editor_ref};
use crate::error::{DriverError, Result};

/// Wraps an editor for a property that may be absent.
///
/// While the value is `Null` the wrapped editor is detached and never sees
/// a value. Setting a non-null value attaches it through the driver's
/// chain, and flushing writes the (possibly edited) value back, or `Null`
/// once the value has been cleared.
pub struct OptionalFieldEditor<S: Editor> {
    editor: Rc<RefCell<S>>,
    chain: Option<Rc<dyn EditorChain>>,
    bound: Option<Box<dyn BoundEditor>>,
    value: Value,
}

impl<S: Editor> OptionalFieldEditor<S> {
    #[must_use]
    pub fn of(editor: Rc<RefCell<S>>) -> Self {
        Self {
            editor,
            chain: None,
            bound: None,
            value: Value::Null,
        }
    }

    /// The wrapped editor.
    #[must_use]
    pub fn editor(&self) -> &Rc<RefCell<S>> {
        &self.editor
    }

    #[must_use]
    pub fn get_value(&self) -> Value {
        self.value.clone()
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        !self.value.is_null()
    }

    /// Attach the wrapped editor to `value`, or detach it when `value` is
    /// null.
    pub fn set_value(&mut self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        if value.is_null() {
            trace!(attached = self.bound.is_some(), "optional field cleared");
            self.bound = None;
            self.value = Value::Null;
            return Ok(());
        }
        if self.bound.is_none() {
            let chain = self.chain.as_ref().ok_or(DriverError::ChainMissing)?;
            self.bound = Some(chain.bind(editor_ref(&self.editor)));
        }
        if let Some(bound) = self.bound.as_mut() {
            bound.edit(value.clone())?;
        }
        self.value = value;
        Ok(())
    }
}

impl<S: Editor> fmt::Debug for OptionalFieldEditor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionalFieldEditor")
            .field("value", &self.value)
            .field("attached", &self.bound.is_some())
            .finish()
    }
}

impl<S: Editor> Editor for OptionalFieldEditor<S> {
    fn as_optional(&mut self) -> Option<&mut dyn OptionalField> {
        Some(self)
    }
}

impl<S: Editor> ChainedEditor for OptionalFieldEditor<S> {
    fn set_editor_chain(&mut self, chain: Rc<dyn EditorChain>) {
        self.bound = None;
        self.chain = Some(chain);
    }

    fn flush_chain(&mut self) -> Result<Value> {
        if let Some(bound) = self.bound.as_mut() {
            self.value = bound.flush()?;
        }
        Ok(self.value.clone())
    }
}

impl<S: Editor> OptionalField for OptionalFieldEditor<S> {
    fn set_optional(&mut self, value: Option<Value>) -> Result<()> {
        self.set_value(value.unwrap_or_default())
    }

    fn is_present(&self) -> bool {
        OptionalFieldEditor::is_present(self)
    }
}
