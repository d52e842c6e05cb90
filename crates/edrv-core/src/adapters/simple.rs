#![forbid(unsafe_code)]

use edrv_model::Value;

use crate::editor::{Editor, LeafValueEditor};

/// A leaf editor that holds whatever value it was last given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleEditor {
    value: Value,
}

impl SimpleEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn of(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Editor for SimpleEditor {
    fn as_leaf(&mut self) -> Option<&mut dyn LeafValueEditor> {
        Some(self)
    }
}

impl LeafValueEditor for SimpleEditor {
    fn get_value(&self) -> Value {
        self.value.clone()
    }

    fn set_value(&mut self, value: Value) {
        self.value = value;
    }
}
