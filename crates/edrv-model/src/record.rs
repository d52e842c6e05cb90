#![forbid(unsafe_code)]

use indexmap::{IndexMap, IndexSet};

use crate::error::PropertyError;
use crate::value::{Bean, ObjectRef, Value};

/// A [`Bean`] with a fixed set of declared properties.
///
/// Properties are declared by the builder calls and keep their declaration
/// order. Assigning an undeclared property fails, as does assigning one
/// marked [`read_only`](Record::read_only).
#[derive(Debug, Clone)]
pub struct Record {
    type_name: String,
    fields: IndexMap<String, Value>,
    read_only: IndexSet<String>,
}

impl Record {
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: IndexMap::new(),
            read_only: IndexSet::new(),
        }
    }

    /// Declare a property with its initial value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Declare a property that can be read but not assigned.
    #[must_use]
    pub fn read_only(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        self.fields.insert(name.clone(), value.into());
        self.read_only.insert(name);
        self
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Move the record into shared storage.
    #[must_use]
    pub fn into_object(self) -> ObjectRef {
        ObjectRef::new(self)
    }
}

impl Bean for Record {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn property(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }

    fn set_property(&mut self, name: &str, value: Value) -> Result<(), PropertyError> {
        if self.read_only.contains(name) {
            return Err(PropertyError::ReadOnly {
                type_name: self.type_name.clone(),
                property: name.to_string(),
            });
        }
        match self.fields.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(PropertyError::Unknown {
                type_name: self.type_name.clone(),
                property: name.to_string(),
            }),
        }
    }

    fn property_names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }
}
