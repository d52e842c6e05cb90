#![forbid(unsafe_code)]

//! Property-based tests for the driver passes.
//!
//! 1. Flushing twice without an edit in between leaves the same model
//! 2. Re-editing a list reuses the editors at the positions both lists share
//! 3. Removing one element disposes exactly one editor
//! 4. Of two slots bound to one property, the later one wins
//! 5. Optional sub-models may be absent on edit and cleared on flush
//! 6. Models built from JSON edit and flush like hand-built ones
//!
//! Run:
//!   cargo test -p edrv --test driver_properties

mod common;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use common::*;
use edrv::prelude::*;
use edrv::{Capabilities, EditorSource, ListRef};
use proptest::prelude::*;
use serde_json::json;

// ── Strategies ──────────────────────────────────────────────────────────

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn items() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-50i64..50, 0..12)
}

// ── Fixtures ────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
struct Counting {
    created: Rc<Cell<usize>>,
    disposed: Rc<RefCell<Vec<Shared<SimpleEditor>>>>,
}

impl EditorSource<SimpleEditor> for Counting {
    fn create(&mut self, _index: usize) -> Shared<SimpleEditor> {
        self.created.set(self.created.get() + 1);
        shared(SimpleEditor::new())
    }

    fn dispose(&mut self, editor: &Shared<SimpleEditor>) {
        self.disposed.borrow_mut().push(Rc::clone(editor));
    }
}

fn list_driver() -> (EditorDriver, Shared<ListEditor<SimpleEditor>>, Counting) {
    let counting = Counting::default();
    let editor = shared(ListEditor::new(counting.clone()));
    let mut driver =
        EditorDriver::new(BindingPlan::new(PlanNode::root().declares(Capabilities::LIST)));
    driver.initialize(&editor);
    (driver, editor, counting)
}

fn list_of(items: &[i64]) -> ListRef {
    items.iter().map(|&i| Value::Int(i)).collect()
}

fn snapshot(fx: &Fixture) -> Vec<Value> {
    vec![
        fx.get("name"),
        fx.get("localTime"),
        prop(&fx.get("address"), "city"),
        prop(&fx.get("address"), "street"),
        prop(&fx.get("manager"), "name"),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// Properties
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn flush_is_idempotent(name in word(), city in word(), manager in word()) {
        let fx = Fixture::new();
        let address_editor = shared(AddressEditor::new());
        let editor = shared(PersonEditor::with_address(Some(editor_ref(&address_editor))));
        let mut driver = EditorDriver::new(person_plan());
        driver.initialize(&editor);
        driver.edit(fx.model()).expect("edit");

        set_text(&editor.borrow().name, name.as_str());
        set_text(&editor.borrow().manager_name, manager.as_str());
        set_text(&address_editor.borrow().city, city.as_str());

        driver.flush().expect("first flush");
        let first = snapshot(&fx);
        driver.flush().expect("second flush");
        prop_assert_eq!(snapshot(&fx), first);
        prop_assert_eq!(fx.get("name"), Value::from(name));
        prop_assert_eq!(fx.address.get("city"), Some(Value::from(city)));
    }

    #[test]
    fn re_edit_reuses_shared_positions(first in items(), second in items()) {
        let (mut driver, editor, counting) = list_driver();
        driver.edit(list_of(&first)).expect("first edit");
        let before = editor.borrow().editors();
        let created = counting.created.get();

        driver.edit(list_of(&second)).expect("second edit");
        let after = editor.borrow().editors();
        let shared_len = first.len().min(second.len());

        prop_assert_eq!(after.len(), second.len());
        prop_assert_eq!(
            counting.created.get() - created,
            second.len().saturating_sub(first.len())
        );
        prop_assert_eq!(
            counting.disposed.borrow().len(),
            first.len().saturating_sub(second.len())
        );
        for i in 0..shared_len {
            prop_assert!(Rc::ptr_eq(&before[i], &after[i]));
        }
        let held: Vec<Value> = after.iter().map(text).collect();
        prop_assert_eq!(held, list_of(&second).to_vec());
    }

    #[test]
    fn removal_disposes_exactly_one_editor(
        (values, index) in items()
            .prop_filter("non-empty", |v| !v.is_empty())
            .prop_flat_map(|v| { let len = v.len(); (Just(v), 0..len) })
    ) {
        // Through the view: the editor at the removed position goes.
        let (mut driver, editor, counting) = list_driver();
        driver.edit(list_of(&values)).expect("edit");
        let before = editor.borrow().editors();
        let view = editor.borrow().list().expect("bound");
        view.remove(index).expect("remove");
        {
            let disposed = counting.disposed.borrow();
            prop_assert_eq!(disposed.len(), 1);
            prop_assert!(Rc::ptr_eq(&disposed[0], &before[index]));
        }

        // Through a re-edit: positions shift, so the trailing editor goes.
        let (mut driver, editor, counting) = list_driver();
        let backing = list_of(&values);
        driver.edit(&backing).expect("edit");
        let before = editor.borrow().editors();
        backing.remove(index);
        driver.edit(&backing).expect("re-edit");
        let disposed = counting.disposed.borrow();
        prop_assert_eq!(disposed.len(), 1);
        prop_assert!(Rc::ptr_eq(&disposed[0], &before[values.len() - 1]));
    }

    #[test]
    fn later_alias_wins(first in word(), second in word()) {
        struct Aliases {
            a: Shared<SimpleEditor>,
            b: Shared<SimpleEditor>,
        }

        impl Editor for Aliases {
            fn sub_editor(&self, field: &str) -> Option<EditorRef> {
                match field {
                    "a" => Some(editor_ref(&self.a)),
                    "b" => Some(editor_ref(&self.b)),
                    _ => None,
                }
            }
        }

        let fx = Fixture::new();
        let editor = shared(Aliases {
            a: shared(SimpleEditor::new()),
            b: shared(SimpleEditor::new()),
        });
        let plan = BindingPlan::new(
            PlanNode::root()
                .child(PlanNode::leaf("a").at("name"))
                .child(PlanNode::leaf("b").at("name")),
        );
        let mut driver = EditorDriver::new(plan);
        driver.initialize(&editor);
        driver.edit(fx.model()).expect("edit");
        set_text(&editor.borrow().a, first.as_str());
        set_text(&editor.borrow().b, second.as_str());
        driver.flush().expect("flush");
        prop_assert_eq!(fx.get("name"), Value::from(second));
    }

    #[test]
    fn optional_address_tolerates_absence(present in any::<bool>(), city in word()) {
        struct OptionalAddress {
            address: Shared<OptionalFieldEditor<AddressEditor>>,
        }

        impl Editor for OptionalAddress {
            fn sub_editor(&self, field: &str) -> Option<EditorRef> {
                (field == "address").then(|| editor_ref(&self.address))
            }
        }

        let fx = Fixture::new();
        if !present {
            fx.person.set("address", Value::Null).expect("clear");
        }
        let delegate = shared(AddressEditor::new());
        let address = shared(OptionalFieldEditor::of(Rc::clone(&delegate)));
        let editor = shared(OptionalAddress { address: Rc::clone(&address) });
        let plan = BindingPlan::new(
            PlanNode::root().child(PlanNode::optional("address", address_slots(PlanNode::root()))),
        );
        let mut driver = EditorDriver::new(plan);
        driver.initialize(&editor);
        driver.edit(fx.model()).expect("edit");
        prop_assert_eq!(address.borrow().is_present(), present);

        let replacement = common::address("", "");
        address.borrow_mut().set_value(&replacement).expect("attach");
        set_text(&delegate.borrow().city, city.as_str());
        driver.flush().expect("flush");
        prop_assert_eq!(fx.get("address"), Value::from(&replacement));
        prop_assert_eq!(replacement.get("city"), Some(Value::from(city)));

        address.borrow_mut().set_value(Value::Null).expect("detach");
        driver.flush().expect("flush");
        prop_assert!(fx.get("address").is_null());
    }

    #[test]
    fn json_models_edit_and_flush(
        name in word(),
        city in word(),
        new_name in word(),
        new_street in word(),
    ) {
        let model = Value::from_json(&json!({
            "name": name,
            "address": { "city": city, "street": "Street" },
            "manager": { "name": "Bill" },
            "localTime": 7,
        }));
        let address_editor = shared(AddressEditor::new());
        let editor = shared(PersonEditor::with_address(Some(editor_ref(&address_editor))));
        let mut driver = EditorDriver::new(person_plan());
        driver.initialize(&editor);
        driver.edit(model.clone()).expect("edit");
        prop_assert_eq!(text(&editor.borrow().name), Value::from(name));
        prop_assert_eq!(text(&address_editor.borrow().city), Value::from(city.as_str()));

        set_text(&editor.borrow().name, new_name.as_str());
        set_text(&address_editor.borrow().street, new_street.as_str());
        driver.flush().expect("flush");
        prop_assert_eq!(
            model.to_json(),
            json!({
                "name": new_name,
                "address": { "city": city, "street": new_street },
                "manager": { "name": "Bill" },
                "localTime": 7,
            })
        );
    }
}
