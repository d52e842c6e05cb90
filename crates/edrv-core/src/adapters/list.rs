#![forbid(unsafe_code)]

//! Positional list reconciliation.
//!
//! A [`ListEditor`] keeps one sub-editor per element of a backing
//! [`ListRef`]. Sub-editors are identified by position: re-editing reuses
//! the editor already materialized at each index and only creates or
//! disposes editors for positions that appear or disappear.
//!
//! Edits made through the [`ListView`] go to a working copy of the backing
//! list; the backing list itself is only rewritten on flush. Changes made
//! to the backing list behind the editor's back are not observed until the
//! next edit.
//!
//! # Invariants
//!
//! 1. After any edit or view mutation, `editors().len()` equals the length
//!    of the working copy.
//! 2. `EditorSource::create` and `EditorSource::dispose` are called exactly
//!    once per position that appears or disappears. Reused positions see
//!    neither.
//! 3. Survivors shifted by a view insert or remove are told their new
//!    position through `EditorSource::set_index`.
//!
//! A reconcile that fails part way keeps the positions fed before the
//! failure, so the working copy can be shorter than the backing list until
//! the next successful edit.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use edrv_model::{ListRef, Value};
use tracing::debug;

use crate::chain::{BoundEditor, EditorChain};
use crate::editor::{ChainedEditor, Editor, ListBinding, editor_ref};
use crate::error::{DriverError, Result};

/// Factory and lifecycle hooks for the sub-editors of a [`ListEditor`].
pub trait EditorSource<S> {
    /// Create the sub-editor for position `index`.
    fn create(&mut self, index: usize) -> Rc<RefCell<S>>;

    /// Called once when `editor` leaves the list.
    fn dispose(&mut self, editor: &Rc<RefCell<S>>) {
        let _ = editor;
    }

    /// Called when a surviving `editor` moves to `index`.
    fn set_index(&mut self, editor: &Rc<RefCell<S>>, index: usize) {
        let _ = (editor, index);
    }
}

/// An [`EditorSource`] that only knows how to create editors.
pub struct FnEditorSource<F> {
    create: F,
}

impl<S, F> EditorSource<S> for FnEditorSource<F>
where
    F: FnMut(usize) -> Rc<RefCell<S>>,
{
    fn create(&mut self, index: usize) -> Rc<RefCell<S>> {
        (self.create)(index)
    }
}

/// Wrap a creation closure as an [`EditorSource`].
pub fn source_fn<S, F>(create: F) -> FnEditorSource<F>
where
    F: FnMut(usize) -> Rc<RefCell<S>>,
{
    FnEditorSource { create }
}

struct Slot<S> {
    editor: Rc<RefCell<S>>,
    bound: Box<dyn BoundEditor>,
}

struct ListState<S> {
    backing: ListRef,
    working: Vec<Value>,
    slots: Vec<Slot<S>>,
}

struct ListInner<S> {
    source: Box<dyn EditorSource<S>>,
    chain: Option<Rc<dyn EditorChain>>,
    state: Option<ListState<S>>,
}

/// Editor for an ordered collection, one sub-editor per element.
pub struct ListEditor<S: Editor> {
    inner: Rc<RefCell<ListInner<S>>>,
}

impl<S: Editor> ListEditor<S> {
    #[must_use]
    pub fn new(source: impl EditorSource<S> + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ListInner {
                source: Box::new(source),
                chain: None,
                state: None,
            })),
        }
    }

    /// The materialized sub-editors, in position order.
    #[must_use]
    pub fn editors(&self) -> Vec<Rc<RefCell<S>>> {
        self.inner
            .borrow()
            .state
            .as_ref()
            .map(|state| state.slots.iter().map(|slot| Rc::clone(&slot.editor)).collect())
            .unwrap_or_default()
    }

    /// A live view of the list being edited, or `None` when the editor is
    /// not bound to a list.
    #[must_use]
    pub fn list(&self) -> Option<ListView<S>> {
        self.inner.borrow().state.as_ref().map(|_| ListView {
            inner: Rc::clone(&self.inner),
        })
    }
}

impl<S: Editor> fmt::Debug for ListEditor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ListEditor")
            .field("chained", &inner.chain.is_some())
            .field("len", &inner.state.as_ref().map(|state| state.slots.len()))
            .finish()
    }
}

impl<S: Editor> Editor for ListEditor<S> {
    fn as_list(&mut self) -> Option<&mut dyn ListBinding> {
        Some(self)
    }
}

impl<S: Editor> ChainedEditor for ListEditor<S> {
    fn set_editor_chain(&mut self, chain: Rc<dyn EditorChain>) {
        let mut inner = self.inner.borrow_mut();
        // Existing sub-editors are kept and re-bound; the next edit feeds
        // them their elements again.
        if let Some(state) = inner.state.as_mut() {
            for slot in &mut state.slots {
                slot.bound = chain.bind(editor_ref(&slot.editor));
            }
        }
        inner.chain = Some(chain);
    }

    fn flush_chain(&mut self) -> Result<Value> {
        let mut inner = self.inner.borrow_mut();
        let Some(state) = inner.state.as_mut() else {
            return Ok(Value::Null);
        };
        for (slot, item) in state.slots.iter_mut().zip(state.working.iter_mut()) {
            *item = slot.bound.flush()?;
        }
        state.backing.replace_all(state.working.clone());
        Ok(Value::List(state.backing.clone()))
    }
}

impl<S: Editor> ListBinding for ListEditor<S> {
    fn reconcile(&mut self, backing: Option<ListRef>) -> Result<()> {
        self.inner.borrow_mut().reconcile(backing)
    }
}

impl<S: Editor> ListInner<S> {
    fn reconcile(&mut self, backing: Option<ListRef>) -> Result<()> {
        let Some(backing) = backing else {
            let disposed = self.detach();
            debug!(disposed, "list detached");
            return Ok(());
        };
        let chain = self.chain.clone().ok_or(DriverError::ChainMissing)?;

        let mut working = backing.to_vec();
        let (mut slots, same_backing) = match self.state.take() {
            Some(state) => {
                let same = state.backing.ptr_eq(&backing);
                (state.slots, same)
            }
            None => (Vec::new(), false),
        };

        let reused = slots.len().min(working.len());
        let mut outcome = slots
            .iter_mut()
            .zip(&working)
            .try_for_each(|(slot, item)| slot.bound.edit(item.clone()));

        let mut created = 0usize;
        if outcome.is_ok() {
            for (index, item) in working.iter().enumerate().skip(slots.len()) {
                match attach(&mut *self.source, &*chain, index, item.clone()) {
                    Ok(slot) => {
                        slots.push(slot);
                        created += 1;
                    }
                    Err(err) => {
                        outcome = Err(err);
                        break;
                    }
                }
            }
        }

        let keep = slots.len().min(working.len());
        let surplus: Vec<Slot<S>> = slots.drain(keep..).collect();
        let disposed = surplus.len();
        for slot in &surplus {
            self.source.dispose(&slot.editor);
        }
        working.truncate(slots.len());

        debug!(created, disposed, reused, same_backing, "list reconciled");
        self.state = Some(ListState {
            backing,
            working,
            slots,
        });
        outcome
    }

    fn detach(&mut self) -> usize {
        let Some(state) = self.state.take() else {
            return 0;
        };
        for slot in &state.slots {
            self.source.dispose(&slot.editor);
        }
        state.slots.len()
    }
}

/// Create the sub-editor for `index`, bind it and feed it `item`. The
/// editor is disposed again if it rejects the value.
fn attach<S: Editor>(
    source: &mut dyn EditorSource<S>,
    chain: &dyn EditorChain,
    index: usize,
    item: Value,
) -> Result<Slot<S>> {
    let editor = source.create(index);
    let mut bound = chain.bind(editor_ref(&editor));
    if let Err(err) = bound.edit(item) {
        source.dispose(&editor);
        return Err(err);
    }
    Ok(Slot { editor, bound })
}

/// Live, mutable view of the list a [`ListEditor`] is editing.
///
/// Every mutation is applied to the editor's working copy and reconciled
/// against its sub-editors immediately. The backing list is only rewritten
/// when the owning driver flushes.
pub struct ListView<S: Editor> {
    inner: Rc<RefCell<ListInner<S>>>,
}

impl<S: Editor> ListView<S> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .borrow()
            .state
            .as_ref()
            .map_or(0, |state| state.working.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Value> {
        self.inner
            .borrow()
            .state
            .as_ref()
            .and_then(|state| state.working.get(index).cloned())
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<Value> {
        self.inner
            .borrow()
            .state
            .as_ref()
            .map(|state| state.working.clone())
            .unwrap_or_default()
    }

    /// Replace the element at `index` and push it into the sub-editor
    /// already there. Returns the previous element.
    pub fn set(&self, index: usize, item: impl Into<Value>) -> Result<Value> {
        let item = item.into();
        let mut inner = self.inner.borrow_mut();
        let state = inner.state.as_mut().ok_or(DriverError::DetachedView)?;
        let length = state.working.len();
        let slot = state
            .slots
            .get_mut(index)
            .ok_or(DriverError::PositionOutOfBounds {
                position: index,
                length,
            })?;
        slot.bound.edit(item.clone())?;
        Ok(std::mem::replace(&mut state.working[index], item))
    }

    /// Insert `item` at `index`, creating a sub-editor for it.
    pub fn insert(&self, index: usize, item: impl Into<Value>) -> Result<()> {
        let item = item.into();
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        let chain = inner.chain.clone().ok_or(DriverError::ChainMissing)?;
        let state = inner.state.as_mut().ok_or(DriverError::DetachedView)?;
        if index > state.working.len() {
            return Err(DriverError::PositionOutOfBounds {
                position: index,
                length: state.working.len(),
            });
        }
        let slot = attach(&mut *inner.source, &*chain, index, item.clone())?;
        state.slots.insert(index, slot);
        state.working.insert(index, item);
        for (position, slot) in state.slots.iter().enumerate().skip(index + 1) {
            inner.source.set_index(&slot.editor, position);
        }
        debug!(index, len = state.working.len(), "list view insert");
        Ok(())
    }

    pub fn push(&self, item: impl Into<Value>) -> Result<()> {
        let len = self.len();
        self.insert(len, item)
    }

    /// Remove the element at `index`, disposing its sub-editor. Returns the
    /// removed element.
    pub fn remove(&self, index: usize) -> Result<Value> {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        let state = inner.state.as_mut().ok_or(DriverError::DetachedView)?;
        if index >= state.working.len() {
            return Err(DriverError::PositionOutOfBounds {
                position: index,
                length: state.working.len(),
            });
        }
        let slot = state.slots.remove(index);
        let item = state.working.remove(index);
        inner.source.dispose(&slot.editor);
        for (position, slot) in state.slots.iter().enumerate().skip(index) {
            inner.source.set_index(&slot.editor, position);
        }
        debug!(index, len = state.working.len(), "list view remove");
        Ok(item)
    }

    /// Remove every element, disposing every sub-editor.
    pub fn clear(&self) -> Result<()> {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        let state = inner.state.as_mut().ok_or(DriverError::DetachedView)?;
        for slot in state.slots.drain(..) {
            inner.source.dispose(&slot.editor);
        }
        state.working.clear();
        Ok(())
    }
}

impl<S: Editor> fmt::Debug for ListView<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_vec()).finish()
    }
}
