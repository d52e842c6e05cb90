#![forbid(unsafe_code)]
#![allow(dead_code)]

//! Sample Person/Address domain and the editors bound to it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use edrv::prelude::*;
use edrv::{Bean, ObjectRef, PropertyError};

pub const UNINITIALIZED: &str = "uninitialized";

// =========================================================================
// Domain
// =========================================================================

pub fn address(city: &str, street: &str) -> ObjectRef {
    Record::new("Address")
        .with("city", city)
        .with("street", street)
        .into_object()
}

pub fn person_record(type_name: &str, name: &str) -> Record {
    Record::new(type_name)
        .with("name", name)
        .with("address", Value::Null)
        .with("manager", Value::Null)
        .with("localTime", 0i64)
}

/// Alice, living at City/Street, managed by Bill.
pub struct Fixture {
    pub person: ObjectRef,
    pub address: ObjectRef,
    pub manager: ObjectRef,
    pub now: i64,
}

impl Fixture {
    pub fn new() -> Self {
        let now = 1_700_000_000_000;
        let address = address("City", "Street");
        let manager = person_record("Person", "Bill").into_object();
        let person = Record::new("Person")
            .with("name", "Alice")
            .with("address", &address)
            .with("manager", &manager)
            .with("localTime", now)
            .into_object();
        Self {
            person,
            address,
            manager,
            now,
        }
    }

    pub fn model(&self) -> Value {
        Value::from(&self.person)
    }

    pub fn get(&self, property: &str) -> Value {
        self.person.get(property).unwrap_or_default()
    }
}

pub fn prop(value: &Value, property: &str) -> Value {
    value
        .as_object()
        .and_then(|object| object.get(property))
        .unwrap_or_default()
}

/// A person whose address list is exposed through a getter only.
pub struct PersonWithList {
    pub name: Value,
    pub addresses: Rc<RefCell<Value>>,
}

impl Bean for PersonWithList {
    fn type_name(&self) -> &str {
        "PersonWithList"
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(self.name.clone()),
            "addresses" => Some(self.addresses.borrow().clone()),
            _ => None,
        }
    }

    fn set_property(
        &mut self,
        name: &str,
        value: Value,
    ) -> std::result::Result<(), PropertyError> {
        match name {
            "name" => {
                self.name = value;
                Ok(())
            }
            "addresses" => Err(PropertyError::ReadOnly {
                type_name: self.type_name().to_string(),
                property: name.to_string(),
            }),
            _ => Err(PropertyError::Unknown {
                type_name: self.type_name().to_string(),
                property: name.to_string(),
            }),
        }
    }
}

// =========================================================================
// Editors
// =========================================================================

pub type Shared<E> = Rc<RefCell<E>>;

pub fn text(editor: &Shared<SimpleEditor>) -> Value {
    editor.borrow().get_value()
}

pub fn set_text(editor: &Shared<SimpleEditor>, value: impl Into<Value>) {
    editor.borrow_mut().set_value(value.into());
}

pub struct AddressEditor {
    pub city: Shared<SimpleEditor>,
    pub street: Shared<SimpleEditor>,
}

impl AddressEditor {
    pub fn new() -> Self {
        Self {
            city: shared(SimpleEditor::of(UNINITIALIZED)),
            street: shared(SimpleEditor::of(UNINITIALIZED)),
        }
    }

    fn slot(&self, field: &str) -> Option<EditorRef> {
        match field {
            "city" => Some(editor_ref(&self.city)),
            "street" => Some(editor_ref(&self.street)),
            _ => None,
        }
    }
}

impl Editor for AddressEditor {
    fn sub_editor(&self, field: &str) -> Option<EditorRef> {
        self.slot(field)
    }
}

pub fn address_slots(node: PlanNode) -> PlanNode {
    node.child(PlanNode::leaf("city"))
        .child(PlanNode::leaf("street"))
}

pub struct PersonEditor {
    pub name: Shared<SimpleEditor>,
    pub address_editor: Option<EditorRef>,
    pub manager_name: Shared<SimpleEditor>,
    pub local_time: Shared<SimpleEditor>,
}

impl PersonEditor {
    pub fn new() -> Self {
        Self::with_address(Some(editor_ref(&shared(AddressEditor::new()))))
    }

    pub fn with_address(address_editor: Option<EditorRef>) -> Self {
        Self {
            name: shared(SimpleEditor::of(UNINITIALIZED)),
            address_editor,
            manager_name: shared(SimpleEditor::of(UNINITIALIZED)),
            local_time: shared(SimpleEditor::of(0i64)),
        }
    }
}

impl Editor for PersonEditor {
    fn sub_editor(&self, field: &str) -> Option<EditorRef> {
        match field {
            "name" => Some(editor_ref(&self.name)),
            "addressEditor" => self.address_editor.clone(),
            "managerName" => Some(editor_ref(&self.manager_name)),
            "localTime" => Some(editor_ref(&self.local_time)),
            _ => None,
        }
    }
}

/// The slots of a `PersonEditor`, added under `node`.
pub fn person_slots(node: PlanNode) -> PlanNode {
    node.child(PlanNode::leaf("name"))
        .child(address_slots(PlanNode::composite("addressEditor")))
        .child(PlanNode::leaf("managerName").at("manager.name"))
        .child(PlanNode::leaf("localTime"))
}

pub fn person_plan() -> BindingPlan {
    BindingPlan::new(person_slots(PlanNode::root()))
}

/// A leaf editor for addresses that still carries the city/street slots of
/// an `AddressEditor`. Counts reads and writes.
pub struct LeafAddressEditor {
    pub base: AddressEditor,
    pub get_value_called: Cell<usize>,
    pub set_value_called: usize,
    pub value: Value,
}

impl LeafAddressEditor {
    pub fn new() -> Self {
        Self {
            base: AddressEditor::new(),
            get_value_called: Cell::new(0),
            set_value_called: 0,
            value: Value::Null,
        }
    }
}

impl Editor for LeafAddressEditor {
    fn sub_editor(&self, field: &str) -> Option<EditorRef> {
        self.base.slot(field)
    }

    fn as_leaf(&mut self) -> Option<&mut dyn LeafValueEditor> {
        Some(self)
    }
}

impl LeafValueEditor for LeafAddressEditor {
    fn get_value(&self) -> Value {
        self.get_value_called.set(self.get_value_called.get() + 1);
        self.value.clone()
    }

    /// Ignores the incoming address and starts a fresh one.
    fn set_value(&mut self, _value: Value) {
        self.set_value_called += 1;
        self.value = Value::from(address("", ""));
    }
}

pub struct ValueAwareAddressEditor {
    pub base: AddressEditor,
    pub flush_called: usize,
    pub set_delegate_called: usize,
    pub set_value_called: usize,
    pub value: Value,
}

impl ValueAwareAddressEditor {
    pub fn new() -> Self {
        Self {
            base: AddressEditor::new(),
            flush_called: 0,
            set_delegate_called: 0,
            set_value_called: 0,
            value: Value::Null,
        }
    }
}

impl Editor for ValueAwareAddressEditor {
    fn sub_editor(&self, field: &str) -> Option<EditorRef> {
        self.base.slot(field)
    }

    fn as_value_aware(&mut self) -> Option<&mut dyn ValueAwareEditor> {
        Some(self)
    }

    fn as_delegate_aware(&mut self) -> Option<&mut dyn HasEditorDelegate> {
        Some(self)
    }
}

impl ValueAwareEditor for ValueAwareAddressEditor {
    fn set_value(&mut self, value: Value) {
        self.set_value_called += 1;
        self.value = value;
    }

    fn flush(&mut self) {
        self.flush_called += 1;
    }
}

impl HasEditorDelegate for ValueAwareAddressEditor {
    fn set_delegate(&mut self, _delegate: EditorDelegate) {
        self.set_delegate_called += 1;
    }
}

/// Leaf, value-aware and delegate-aware at once.
pub struct ValueAwareLeafAddressEditor {
    pub leaf: LeafAddressEditor,
    pub flush_called: usize,
    pub set_delegate_called: usize,
}

impl ValueAwareLeafAddressEditor {
    pub fn new() -> Self {
        Self {
            leaf: LeafAddressEditor::new(),
            flush_called: 0,
            set_delegate_called: 0,
        }
    }
}

impl Editor for ValueAwareLeafAddressEditor {
    fn sub_editor(&self, field: &str) -> Option<EditorRef> {
        self.leaf.base.slot(field)
    }

    fn as_leaf(&mut self) -> Option<&mut dyn LeafValueEditor> {
        Some(&mut self.leaf)
    }

    fn as_value_aware(&mut self) -> Option<&mut dyn ValueAwareEditor> {
        Some(self)
    }

    fn as_delegate_aware(&mut self) -> Option<&mut dyn HasEditorDelegate> {
        Some(self)
    }
}

impl ValueAwareEditor for ValueAwareLeafAddressEditor {
    fn set_value(&mut self, value: Value) {
        LeafValueEditor::set_value(&mut self.leaf, value);
    }

    fn flush(&mut self) {
        self.flush_called += 1;
    }
}

impl HasEditorDelegate for ValueAwareLeafAddressEditor {
    fn set_delegate(&mut self, _delegate: EditorDelegate) {
        self.set_delegate_called += 1;
    }
}

/// A view that is not an editor itself but stands for one.
pub struct AddressEditorView {
    pub address_editor: Shared<LeafAddressEditor>,
}

impl Editor for AddressEditorView {
    fn as_is_editor(&self) -> Option<EditorRef> {
        Some(editor_ref(&self.address_editor))
    }
}

/// A view that is a leaf address editor *and* stands for another one.
pub struct AddressCoEditorView {
    pub own: LeafAddressEditor,
    pub address_editor: Shared<LeafAddressEditor>,
}

impl Editor for AddressCoEditorView {
    fn sub_editor(&self, field: &str) -> Option<EditorRef> {
        self.own.base.slot(field)
    }

    fn as_leaf(&mut self) -> Option<&mut dyn LeafValueEditor> {
        Some(&mut self.own)
    }

    fn as_is_editor(&self) -> Option<EditorRef> {
        Some(editor_ref(&self.address_editor))
    }
}

pub struct SimpleEditorWithDelegate {
    pub editor: SimpleEditor,
    pub delegate: Option<EditorDelegate>,
}

impl SimpleEditorWithDelegate {
    pub fn of(value: impl Into<Value>) -> Self {
        Self {
            editor: SimpleEditor::of(value),
            delegate: None,
        }
    }
}

impl Editor for SimpleEditorWithDelegate {
    fn as_leaf(&mut self) -> Option<&mut dyn LeafValueEditor> {
        Some(&mut self.editor)
    }

    fn as_delegate_aware(&mut self) -> Option<&mut dyn HasEditorDelegate> {
        Some(self)
    }
}

impl HasEditorDelegate for SimpleEditorWithDelegate {
    fn set_delegate(&mut self, delegate: EditorDelegate) {
        self.delegate = Some(delegate);
    }
}

/// Editor for a `Person` subtype that only exposes the name.
pub struct PersonGenericEditor {
    pub name: Shared<SimpleEditor>,
}

impl PersonGenericEditor {
    pub fn new() -> Self {
        Self {
            name: shared(SimpleEditor::of(UNINITIALIZED)),
        }
    }
}

impl Editor for PersonGenericEditor {
    fn sub_editor(&self, field: &str) -> Option<EditorRef> {
        (field == "name").then(|| editor_ref(&self.name))
    }
}
