#![forbid(unsafe_code)]

//! Domain object model for edrv.
//!
//! Editors never see concrete domain types. They see [`Value`]s, and the
//! objects inside those values are reached only through the [`Bean`]
//! property surface. [`PropertyPath`] walks that surface to read and write
//! nested properties.
//!
//! # Key Components
//!
//! - [`Value`] - Scalar or shared-reference value flowing between model and editors
//! - [`ObjectRef`] / [`ListRef`] - Cheap-clone handles with identity semantics
//! - [`Record`] - Stock [`Bean`] backed by an insertion-ordered map
//! - [`PropertyPath`] - Dotted property path resolution (`manager.name`)

pub mod error;
pub mod path;
pub mod record;
pub mod value;

pub use error::{PathError, PropertyError};
pub use path::PropertyPath;
pub use record::Record;
pub use value::{Bean, ListRef, ObjectRef, Value};
