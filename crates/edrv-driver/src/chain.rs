#![forbid(unsafe_code)]

use std::rc::Rc;

use edrv_core::{BoundEditor, EditorChain, EditorRef, PlanNode, Result};
use edrv_model::{PropertyPath, Value};

use crate::node::{BindContext, EditorNode};

/// Chain installed on list and optional editors: binds each runtime
/// sub-editor to the slot's element plan, under the slot's own path.
pub(crate) struct SubtreeChain {
    element: Rc<PlanNode>,
    base: PropertyPath,
    ctx: Rc<BindContext>,
}

impl SubtreeChain {
    pub(crate) fn new(element: PlanNode, base: PropertyPath, ctx: Rc<BindContext>) -> Self {
        Self {
            element: Rc::new(element),
            base,
            ctx,
        }
    }
}

impl EditorChain for SubtreeChain {
    fn bind(&self, editor: EditorRef) -> Box<dyn BoundEditor> {
        Box::new(SubtreeEditor {
            root: EditorNode::bind(&self.element, editor, &self.base, &self.ctx),
            ctx: Rc::clone(&self.ctx),
            element: Value::Null,
        })
    }
}

/// One runtime sub-editor and the tree bound under it.
struct SubtreeEditor {
    root: EditorNode,
    ctx: Rc<BindContext>,
    element: Value,
}

impl BoundEditor for SubtreeEditor {
    fn edit(&mut self, value: Value) -> Result<()> {
        self.element = value;
        self.root.edit(&self.element, &self.ctx)
    }

    fn flush(&mut self) -> Result<Value> {
        let value = self.root.flush_root(&self.ctx, None)?;
        Ok(value.unwrap_or_else(|| self.element.clone()))
    }
}
