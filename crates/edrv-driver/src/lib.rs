#![forbid(unsafe_code)]

//! Editor driver for edrv.
//!
//! An [`EditorDriver`] binds a tree of editors, described by a
//! [`BindingPlan`](edrv_core::BindingPlan), to a model value. `edit` pushes
//! the model down into the editors; `flush` pulls edited values back up
//! and writes them into the model.
//!
//! # Key Components
//!
//! - [`EditorDriver`] - Lifecycle state machine: `initialize`, `edit`, `flush`
//! - [`DriverConfig`] - Dirty tracking, indirection depth, empty-path write policy
//!
//! # Example
//!
//! ```ignore
//! let plan = BindingPlan::new(PlanNode::root().child(PlanNode::leaf("name")));
//! let mut driver = EditorDriver::new(plan);
//! driver.initialize(&editor);
//! driver.edit(person.clone())?;
//! // ... user edits ...
//! driver.flush()?;
//! ```

mod chain;
mod collector;
pub mod config;
mod driver;
mod node;

#[cfg(feature = "config")]
pub use config::ConfigError;
pub use config::{DriverConfig, EmptyPathPolicy};
pub use driver::EditorDriver;
