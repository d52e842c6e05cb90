#![forbid(unsafe_code)]

//! Editor capability model for edrv.
//!
//! An editor tree is a graph of user-defined editor objects. The driver
//! never relies on their concrete types: it asks each instance, at each
//! visit, which capabilities it provides through the accessors on
//! [`Editor`]. The precomputed [`BindingPlan`] supplies the static shape
//! (which slot binds which property path).
//!
//! # Key Components
//!
//! - [`Editor`] - Capability accessors every editor implements
//! - [`LeafValueEditor`] / [`ValueAwareEditor`] / [`HasEditorDelegate`] - Orthogonal capabilities
//! - [`ListBinding`] / [`OptionalField`] - Editors whose children are attached through an [`EditorChain`]
//! - [`BindingPlan`] / [`PlanNode`] - Immutable description of the editor tree
//! - [`adapters`] - Stock editors: [`SimpleEditor`], [`ListEditor`], [`OptionalFieldEditor`]

pub mod adapters;
pub mod capability;
pub mod chain;
pub mod delegate;
pub mod editor;
pub mod error;
pub mod lifecycle;
pub mod plan;

pub use adapters::{
    EditorSource, FnEditorSource, ListEditor, ListView, OptionalFieldEditor, SimpleEditor,
    source_fn,
};
pub use capability::Capabilities;
pub use chain::{BoundEditor, EditorChain};
pub use delegate::{DriverSignals, EditorDelegate};
pub use editor::{
    ChainedEditor, Editor, EditorRef, HasEditorDelegate, LeafValueEditor, ListBinding,
    OptionalField, ValueAwareEditor, editor_ref, shared,
};
pub use error::{BindingError, DriverError, Result};
pub use lifecycle::DriverState;
pub use plan::{BindingPlan, PlanNode};

pub use edrv_model as model;
