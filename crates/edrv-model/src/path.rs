#![forbid(unsafe_code)]

//! Dotted property paths.
//!
//! A [`PropertyPath`] names a property relative to some model object:
//! `name`, `manager.name`, `item.city`. The empty path names the object
//! itself.
//!
//! # Invariants
//!
//! 1. Reading the empty path returns the root unchanged.
//! 2. Reading through an absent (`Null`) object yields `Ok(None)`, never an
//!    error. Absence is an outcome, not a failure.
//! 3. Writing never creates intermediate objects. A `Null` parent of the
//!    terminal segment is reported as [`PathError::AbsentIntermediate`].

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::PathError;
use crate::value::{ObjectRef, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PropertyPath {
    segments: SmallVec<[String; 4]>,
}

impl PropertyPath {
    /// The path denoting the model object itself.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a dotted path. Empty segments are ignored, so `""` and `"."`
    /// both denote the empty path.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split('.')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// `self` followed by `child`.
    #[must_use]
    pub fn join(&self, child: &PropertyPath) -> PropertyPath {
        let mut segments = self.segments.clone();
        segments.extend(child.segments.iter().cloned());
        PropertyPath { segments }
    }

    /// Resolve the path against `root`.
    ///
    /// Returns `Ok(None)` when an object along the way, the root included,
    /// is `Null`.
    pub fn read(&self, root: &Value) -> Result<Option<Value>, PathError> {
        let mut current = root.clone();
        for segment in &self.segments {
            current = match current {
                Value::Null => return Ok(None),
                Value::Object(obj) => property_of(&obj, segment)?,
                other => {
                    return Err(PathError::NotAnObject {
                        segment: segment.clone(),
                        found: other.kind(),
                    });
                }
            };
        }
        Ok(Some(current))
    }

    /// Assign `value` to the terminal property, resolving the preceding
    /// segments against `root`.
    pub fn write(&self, root: &Value, value: Value) -> Result<(), PathError> {
        let Some((terminal, parents)) = self.segments.split_last() else {
            return Err(PathError::EmptyPath);
        };
        let mut current = root.clone();
        for segment in parents {
            current = match current {
                Value::Object(obj) => property_of(&obj, segment)?,
                Value::Null => return Err(self.absent_at(segment)),
                other => {
                    return Err(PathError::NotAnObject {
                        segment: segment.clone(),
                        found: other.kind(),
                    });
                }
            };
        }
        match current {
            Value::Object(obj) => obj.set(terminal, value).map_err(PathError::from),
            Value::Null => Err(self.absent_at(terminal)),
            other => Err(PathError::NotAnObject {
                segment: terminal.clone(),
                found: other.kind(),
            }),
        }
    }

    fn absent_at(&self, segment: &str) -> PathError {
        PathError::AbsentIntermediate {
            path: self.to_string(),
            segment: segment.to_string(),
        }
    }
}

fn property_of(obj: &ObjectRef, segment: &str) -> Result<Value, PathError> {
    obj.get(segment).ok_or_else(|| PathError::UnknownProperty {
        type_name: obj.type_name(),
        property: segment.to_string(),
    })
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl From<&str> for PropertyPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl From<String> for PropertyPath {
    fn from(path: String) -> Self {
        Self::parse(&path)
    }
}

impl From<PropertyPath> for String {
    fn from(path: PropertyPath) -> Self {
        path.to_string()
    }
}
