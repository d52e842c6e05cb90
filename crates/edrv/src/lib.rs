#![forbid(unsafe_code)]

//! edrv public facade crate.
//!
//! Re-exports the model, editor and driver layers and offers a prelude for
//! day-to-day use:
//!
//! ```ignore
//! use edrv::prelude::*;
//!
//! let plan = BindingPlan::new(
//!     PlanNode::root()
//!         .child(PlanNode::leaf("name"))
//!         .child(PlanNode::leaf("managerName").at("manager.name")),
//! );
//! let mut driver = EditorDriver::new(plan);
//! driver.initialize(&person_editor);
//! driver.edit(person.clone())?;
//! driver.flush()?;
//! ```

// --- Model re-exports ------------------------------------------------------

pub use edrv_model::{Bean, ListRef, ObjectRef, PathError, PropertyError, PropertyPath, Record, Value};

// --- Editor re-exports -----------------------------------------------------

pub use edrv_core::{
    BindingError, BindingPlan, BoundEditor, Capabilities, ChainedEditor, DriverError, DriverState,
    Editor, EditorChain, EditorDelegate, EditorRef, EditorSource, FnEditorSource,
    HasEditorDelegate, LeafValueEditor, ListBinding, ListEditor, ListView, OptionalField,
    OptionalFieldEditor, PlanNode, Result, SimpleEditor, ValueAwareEditor, editor_ref, shared,
    source_fn,
};

// --- Driver re-exports -----------------------------------------------------

#[cfg(feature = "config")]
pub use edrv_driver::ConfigError;
pub use edrv_driver::{DriverConfig, EditorDriver, EmptyPathPolicy};

// --- Prelude ---------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BindingPlan, DriverConfig, DriverError, Editor, EditorDelegate, EditorDriver, EditorRef,
        HasEditorDelegate, LeafValueEditor, ListEditor, OptionalFieldEditor, PlanNode, Record,
        Result, SimpleEditor, Value, ValueAwareEditor, editor_ref, shared, source_fn,
    };
    pub use crate::{core, driver, model};
}

pub use edrv_core as core;
pub use edrv_driver as driver;
pub use edrv_model as model;
