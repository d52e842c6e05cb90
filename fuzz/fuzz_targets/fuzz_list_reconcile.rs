#![no_main]

use std::cell::Cell;
use std::rc::Rc;

use arbitrary::Arbitrary;
use edrv_core::model::{ListRef, Value};
use edrv_core::{
    BindingPlan, Capabilities, EditorSource, LeafValueEditor, ListEditor, PlanNode, SimpleEditor,
    shared,
};
use edrv_driver::EditorDriver;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Edit(Vec<u8>),
    EditNull,
    Set(u8, u8),
    Insert(u8, u8),
    Remove(u8),
    Clear,
    Flush,
}

#[derive(Clone, Default)]
struct Live(Rc<Cell<isize>>);

impl EditorSource<SimpleEditor> for Live {
    fn create(&mut self, _index: usize) -> Rc<std::cell::RefCell<SimpleEditor>> {
        self.0.set(self.0.get() + 1);
        shared(SimpleEditor::new())
    }

    fn dispose(&mut self, _editor: &Rc<std::cell::RefCell<SimpleEditor>>) {
        self.0.set(self.0.get() - 1);
    }
}

fuzz_target!(|ops: Vec<Op>| {
    if ops.len() > 64 {
        return;
    }
    let live = Live::default();
    let editor = shared(ListEditor::new(live.clone()));
    let mut driver =
        EditorDriver::new(BindingPlan::new(PlanNode::root().declares(Capabilities::LIST)));
    driver.initialize(&editor);
    let mut edited = false;

    for op in ops {
        let view = editor.borrow().list();
        match op {
            Op::Edit(items) => {
                let list: ListRef = items.iter().map(|&b| Value::Int(i64::from(b))).collect();
                driver.edit(list).expect("edit a list");
                edited = true;
            }
            Op::EditNull => {
                driver.edit(Value::Null).expect("edit null");
                edited = true;
            }
            Op::Set(i, v) => {
                if let Some(view) = view {
                    let _ = view.set(usize::from(i), Value::Int(i64::from(v)));
                }
            }
            Op::Insert(i, v) => {
                if let Some(view) = view {
                    let _ = view.insert(usize::from(i), Value::Int(i64::from(v)));
                }
            }
            Op::Remove(i) => {
                if let Some(view) = view {
                    let _ = view.remove(usize::from(i));
                }
            }
            Op::Clear => {
                if let Some(view) = view {
                    view.clear().expect("clear");
                }
            }
            Op::Flush => {
                if edited {
                    driver.flush().expect("flush");
                }
            }
        }

        // One live editor per element, each holding its element.
        let editors = editor.borrow().editors();
        let items = editor.borrow().list().map(|view| view.to_vec()).unwrap_or_default();
        assert_eq!(editors.len(), items.len());
        assert_eq!(live.0.get(), editors.len() as isize);
        for (e, item) in editors.iter().zip(&items) {
            assert_eq!(&e.borrow().get_value(), item);
        }
    }
});
