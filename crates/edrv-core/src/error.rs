#![forbid(unsafe_code)]

use edrv_model::PathError;
use thiserror::Error;

use crate::capability::Capabilities;
use crate::lifecycle::DriverState;

pub type Result<T> = std::result::Result<T, DriverError>;

/// The model and the editor tree disagree about the shape of the data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("cannot bind `{path}`: {source}")]
    Path { path: String, source: PathError },

    #[error("`{path}` is declared {capability:?} but the bound editor does not provide it")]
    MissingCapability {
        path: String,
        capability: Capabilities,
    },

    #[error("`{path}` expects a {expected} value, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Errors surfaced by drivers and by the editors they manage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    #[error("{operation}() is not allowed while the driver is {state}")]
    IllegalLifecycle {
        operation: &'static str,
        state: DriverState,
    },

    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error("position {position} out of bounds (length {length})")]
    PositionOutOfBounds { position: usize, length: usize },

    #[error("no editor chain installed; initialize a driver over this editor first")]
    ChainMissing,

    #[error("list view is detached from its backing list")]
    DetachedView,
}

impl DriverError {
    /// Wrap a path failure at the editor path `path`.
    #[must_use]
    pub fn path(path: impl Into<String>, source: PathError) -> Self {
        Self::Binding(BindingError::Path {
            path: path.into(),
            source,
        })
    }

    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::IllegalLifecycle { .. })
    }
}
