#![forbid(unsafe_code)]

//! Stock editors.
//!
//! - [`SimpleEditor`] - a leaf holding a single value
//! - [`ListEditor`] - one sub-editor per element of a backing list
//! - [`OptionalFieldEditor`] - a sub-editor attached only while its value exists

mod list;
mod optional;
mod simple;

pub use list::{EditorSource, FnEditorSource, ListEditor, ListView, source_fn};
pub use optional::OptionalFieldEditor;
pub use simple::SimpleEditor;
