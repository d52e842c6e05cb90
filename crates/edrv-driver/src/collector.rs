#![forbid(unsafe_code)]

//! Leaf value snapshots for dirty estimation.
//!
//! After an edit the collector reads every statically bound leaf once and
//! remembers what it saw. Flush refreshes the snapshot with the values it
//! reads anyway, so dirty tracking costs no extra reads on flush. Leaves
//! under list and optional editors are not tracked.

use ahash::AHashMap;
use edrv_model::Value;

use crate::node::EditorNode;

#[derive(Debug, Default)]
pub(crate) struct ValueCollector {
    snapshot: AHashMap<usize, Value>,
}

impl ValueCollector {
    pub(crate) fn clear(&mut self) {
        self.snapshot.clear();
    }

    pub(crate) fn record(&mut self, id: usize, value: Value) {
        self.snapshot.insert(id, value);
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshot.len()
    }

    /// Replace the snapshot with the current value of every leaf under
    /// `root`.
    pub(crate) fn capture(&mut self, root: &EditorNode) {
        self.snapshot.clear();
        visit_leaves(root, &mut |id, value| {
            self.snapshot.insert(id, value);
        });
    }

    /// Whether any leaf under `root` now differs from its snapshot.
    pub(crate) fn differs(&self, root: &EditorNode) -> bool {
        let mut differs = false;
        visit_leaves(root, &mut |id, value| {
            differs |= self.snapshot.get(&id) != Some(&value);
        });
        differs
    }
}

/// Read each leaf once. Leaves are not descended into; co-editors are
/// visited after the node they belong to.
fn visit_leaves(node: &EditorNode, visit: &mut dyn FnMut(usize, Value)) {
    let value = node
        .editor()
        .borrow_mut()
        .as_leaf()
        .map(|leaf| leaf.get_value());
    match value {
        Some(value) => visit(node.id(), value),
        None => {
            for child in node.children() {
                visit_leaves(child, visit);
            }
        }
    }
    if let Some(co_editor) = node.co_editor() {
        visit_leaves(co_editor, visit);
    }
}
