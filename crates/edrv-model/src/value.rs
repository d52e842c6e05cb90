#![forbid(unsafe_code)]

//! Values exchanged between domain objects and editors.
//!
//! # Identity
//!
//! Objects and lists are shared through reference-counted handles. Cloning
//! an [`ObjectRef`] or [`ListRef`] yields a second handle to the **same**
//! storage, and [`Value`] equality compares those handles by identity. Two
//! distinct records holding identical fields are *not* equal. Scalars compare
//! structurally.
//!
//! # Failure Modes
//!
//! - **Re-entrant mutation**: setting a property from inside a
//!   [`Bean::set_property`] implementation on the same object panics
//!   (RefCell borrow rules).
//! - **Cycles**: [`Value::to_json`] recurses without cycle detection; an
//!   object graph that contains itself overflows the stack.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::PropertyError;
use crate::record::Record;

/// Property surface of an opaque domain object.
pub trait Bean {
    /// Name of the domain type, used in diagnostics.
    fn type_name(&self) -> &str;

    /// Read a property. `None` means the type has no such property; a
    /// property that exists but holds nothing reads as `Some(Value::Null)`.
    fn property(&self, name: &str) -> Option<Value>;

    /// Assign a property.
    fn set_property(&mut self, name: &str, value: Value) -> Result<(), PropertyError>;

    /// Declared property names, in declaration order.
    fn property_names(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Shared handle to a domain object.
#[derive(Clone)]
pub struct ObjectRef {
    inner: Rc<RefCell<dyn Bean>>,
}

impl ObjectRef {
    /// Move `bean` into shared storage.
    #[must_use]
    pub fn new<B: Bean + 'static>(bean: B) -> Self {
        let inner: Rc<RefCell<dyn Bean>> = Rc::new(RefCell::new(bean));
        Self { inner }
    }

    #[must_use]
    pub fn type_name(&self) -> String {
        self.inner.borrow().type_name().to_string()
    }

    /// Read a property; see [`Bean::property`].
    #[must_use]
    pub fn get(&self, property: &str) -> Option<Value> {
        self.inner.borrow().property(property)
    }

    /// Assign a property; see [`Bean::set_property`].
    pub fn set(&self, property: &str, value: impl Into<Value>) -> Result<(), PropertyError> {
        self.inner.borrow_mut().set_property(property, value.into())
    }

    /// Access the underlying bean by reference.
    pub fn with<R>(&self, f: impl FnOnce(&dyn Bean) -> R) -> R {
        f(&*self.inner.borrow())
    }

    /// True when both handles point at the same object.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{:p}",
            self.inner.borrow().type_name(),
            Rc::as_ptr(&self.inner) as *const ()
        )
    }
}

/// Shared handle to an ordered sequence of values.
#[derive(Clone, Default)]
pub struct ListRef {
    inner: Rc<RefCell<Vec<Value>>>,
}

impl ListRef {
    #[must_use]
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(items)),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Value> {
        self.inner.borrow().get(index).cloned()
    }

    /// Replace the element at `index`, returning the previous one.
    /// Returns `None` and leaves the list untouched when out of bounds.
    pub fn set(&self, index: usize, value: impl Into<Value>) -> Option<Value> {
        let mut items = self.inner.borrow_mut();
        let slot = items.get_mut(index)?;
        Some(std::mem::replace(slot, value.into()))
    }

    pub fn push(&self, value: impl Into<Value>) {
        self.inner.borrow_mut().push(value.into());
    }

    /// Insert at `index`. Panics if `index > len`, like [`Vec::insert`].
    pub fn insert(&self, index: usize, value: impl Into<Value>) {
        self.inner.borrow_mut().insert(index, value.into());
    }

    pub fn remove(&self, index: usize) -> Option<Value> {
        let mut items = self.inner.borrow_mut();
        (index < items.len()).then(|| items.remove(index))
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    /// Swap the whole content for `items`, keeping the list's identity.
    pub fn replace_all(&self, items: Vec<Value>) {
        *self.inner.borrow_mut() = items;
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<Value> {
        self.inner.borrow().clone()
    }

    /// True when both handles point at the same list.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ListRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.borrow().iter()).finish()
    }
}

impl FromIterator<Value> for ListRef {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A model value.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Object(ObjectRef),
    List(ListRef),
}

impl Value {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&ListRef> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Object(_) => "object",
            Self::List(_) => "list",
        }
    }

    /// Build a value graph from JSON. Objects become [`Record`]s with the
    /// type name `object`.
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Self::Str(s.clone()),
            serde_json::Value::Array(items) => {
                Self::List(items.iter().map(Self::from_json).collect())
            }
            serde_json::Value::Object(map) => {
                let record = map
                    .iter()
                    .fold(Record::new("object"), |record, (key, value)| {
                        record.with(key, Self::from_json(value))
                    });
                Self::Object(ObjectRef::new(record))
            }
        }
    }

    /// Render the value graph as JSON.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int(i) => serde_json::Value::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::Str(s) => serde_json::Value::String(s.clone()),
            Self::List(list) => {
                serde_json::Value::Array(list.to_vec().iter().map(Self::to_json).collect())
            }
            Self::Object(obj) => {
                let map = obj.with(|bean| {
                    bean.property_names()
                        .into_iter()
                        .map(|name| {
                            let value = bean.property(&name).unwrap_or_default();
                            (name, value)
                        })
                        .collect::<Vec<_>>()
                });
                serde_json::Value::Object(
                    map.into_iter()
                        .map(|(name, value)| (name, value.to_json()))
                        .collect(),
                )
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            (Self::List(a), Self::List(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Object(obj) => write!(f, "{obj:?}"),
            Self::List(list) => write!(f, "{list:?}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Self::Object(obj)
    }
}

impl From<&ObjectRef> for Value {
    fn from(obj: &ObjectRef) -> Self {
        Self::Object(obj.clone())
    }
}

impl From<ListRef> for Value {
    fn from(list: ListRef) -> Self {
        Self::List(list)
    }
}

impl From<&ListRef> for Value {
    fn from(list: &ListRef) -> Self {
        Self::List(list.clone())
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Object(ObjectRef::new(record))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}
