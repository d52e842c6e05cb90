#![forbid(unsafe_code)]

use thiserror::Error;

/// Failure raised by a [`Bean`](crate::Bean) property setter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    #[error("{type_name} has no property `{property}`")]
    Unknown { type_name: String, property: String },

    #[error("{type_name}.{property} is read-only")]
    ReadOnly { type_name: String, property: String },
}

/// Failure raised while resolving a [`PropertyPath`](crate::PropertyPath).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("cannot write `{path}`: `{segment}` is reached through an absent object")]
    AbsentIntermediate { path: String, segment: String },

    #[error("{type_name} has no property `{property}`")]
    UnknownProperty { type_name: String, property: String },

    #[error("cannot read `{segment}` from a {found} value")]
    NotAnObject { segment: String, found: &'static str },

    #[error("{type_name}.{property} is read-only")]
    ReadOnly { type_name: String, property: String },

    #[error("the empty path denotes the model itself and cannot be assigned")]
    EmptyPath,
}

impl From<PropertyError> for PathError {
    fn from(err: PropertyError) -> Self {
        match err {
            PropertyError::Unknown {
                type_name,
                property,
            } => Self::UnknownProperty {
                type_name,
                property,
            },
            PropertyError::ReadOnly {
                type_name,
                property,
            } => Self::ReadOnly {
                type_name,
                property,
            },
        }
    }
}
