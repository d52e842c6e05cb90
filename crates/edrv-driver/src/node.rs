#![forbid(unsafe_code)]

//! The bound editor tree and its edit and flush passes.
//!
//! An [`EditorNode`] pairs one editor instance with the plan slot it was
//! found in. The tree is captured once, when a driver is initialized (or a
//! chain binds a runtime-created editor): each plan child is looked up
//! through `Editor::sub_editor`, and empty slots prune their subtree.
//!
//! Capabilities are never cached. Every visit re-queries the instance, so
//! an editor placed in a slot declared for something else is still driven
//! by what it actually is.
//!
//! # Pass order
//!
//! Both passes walk the tree in plan pre-order. Within a node, the editor
//! itself is handled first, then its children, then its co-editor (the
//! editor returned by `as_is_editor`), which shares the node's path. Flush
//! writes as it goes, so of two slots bound to the same property the later
//! one wins.

use std::cell::Cell;
use std::rc::Rc;

use edrv_core::{
    BindingError, Capabilities, DriverError, DriverSignals, EditorDelegate, EditorRef, PlanNode,
    Result,
};
use edrv_model::{ListRef, PathError, PropertyPath, Value};
use tracing::{debug, trace, warn};

use crate::chain::SubtreeChain;
use crate::collector::ValueCollector;
use crate::config::{DriverConfig, EmptyPathPolicy};

/// State shared by every node bound during one driver initialization,
/// including nodes bound later through chains.
#[derive(Debug)]
pub(crate) struct BindContext {
    pub(crate) config: DriverConfig,
    pub(crate) signals: Rc<DriverSignals>,
    next_id: Cell<usize>,
}

impl BindContext {
    pub(crate) fn new(config: DriverConfig) -> Rc<Self> {
        Rc::new(Self {
            config,
            signals: DriverSignals::new(),
            next_id: Cell::new(0),
        })
    }

    fn next_id(&self) -> usize {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

pub(crate) struct EditorNode {
    id: usize,
    field: String,
    path: PropertyPath,
    full_path: String,
    declared: Capabilities,
    editor: EditorRef,
    children: Vec<EditorNode>,
    co_editor: Option<Box<EditorNode>>,
    /// Sub-model resolved by the last edit.
    model: Value,
}

fn same_editor(a: &EditorRef, b: &EditorRef) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

impl EditorNode {
    /// Capture `editor` and its sub-editors according to `plan`. `base` is
    /// the full path of the parent slot.
    pub(crate) fn bind(
        plan: &PlanNode,
        editor: EditorRef,
        base: &PropertyPath,
        ctx: &Rc<BindContext>,
    ) -> Self {
        Self::bind_at_depth(plan, editor, base, ctx, 0, &mut Vec::new())
    }

    /// `depth` counts the `as_is_editor` hops taken on the way down from
    /// the bind root; `trail` holds the editors being bound above this one.
    fn bind_at_depth(
        plan: &PlanNode,
        editor: EditorRef,
        base: &PropertyPath,
        ctx: &Rc<BindContext>,
        depth: usize,
        trail: &mut Vec<EditorRef>,
    ) -> Self {
        let full = base.join(plan.path());
        let full_path = full.to_string();
        trail.push(Rc::clone(&editor));

        let mut children = Vec::with_capacity(plan.children().len());
        for child in plan.children() {
            let slot = editor.borrow().sub_editor(child.field());
            match slot {
                Some(sub_editor) => {
                    let node = Self::bind_at_depth(child, sub_editor, &full, ctx, depth, trail);
                    children.push(node);
                }
                None => debug!(
                    field = child.field(),
                    parent = %full_path,
                    "empty sub-editor slot, subtree skipped"
                ),
            }
        }

        let inner = editor.borrow().as_is_editor();
        let co_editor = match inner {
            Some(inner) if trail.iter().any(|bound| same_editor(bound, &inner)) => {
                debug!(
                    path = %full_path,
                    "as_is_editor returns an editor bound above, not followed"
                );
                None
            }
            Some(_) if depth >= ctx.config.max_indirection_depth => {
                warn!(
                    path = %full_path,
                    depth,
                    "as_is_editor chain exceeds max_indirection_depth, not followed"
                );
                None
            }
            Some(inner) => Some(Box::new(Self::bind_at_depth(
                plan,
                inner,
                base,
                ctx,
                depth + 1,
                trail,
            ))),
            None => None,
        };
        trail.pop();

        install_chain(&editor, plan, &full, ctx);

        Self {
            id: ctx.next_id(),
            field: plan.field().to_string(),
            path: plan.path().clone(),
            full_path,
            declared: plan.declared(),
            editor,
            children,
            co_editor,
            model: Value::Null,
        }
    }

    /// Number of bound nodes in this subtree, co-editors included.
    pub(crate) fn count(&self) -> usize {
        1 + self.children.iter().map(EditorNode::count).sum::<usize>()
            + self.co_editor.as_ref().map_or(0, |co| co.count())
    }

    pub(crate) fn id(&self) -> usize {
        self.id
    }

    pub(crate) fn editor(&self) -> &EditorRef {
        &self.editor
    }

    pub(crate) fn children(&self) -> &[EditorNode] {
        &self.children
    }

    pub(crate) fn co_editor(&self) -> Option<&EditorNode> {
        self.co_editor.as_deref()
    }

    // ── Edit ────────────────────────────────────────────────────────────

    /// Resolve this node's sub-model against `parent` and push it down.
    pub(crate) fn edit(&mut self, parent: &Value, ctx: &BindContext) -> Result<()> {
        let resolved = self
            .path
            .read(parent)
            .map_err(|source| DriverError::path(&self.full_path, source))?;
        self.check_capabilities()?;
        self.apply(resolved, ctx)
    }

    fn apply(&mut self, resolved: Option<Value>, ctx: &BindContext) -> Result<()> {
        self.model = resolved.clone().unwrap_or_default();

        let descend = {
            let mut editor = self.editor.borrow_mut();
            trace!(
                path = %self.full_path,
                field = %self.field,
                capabilities = ?Capabilities::of(&mut *editor),
                "edit"
            );
            let descend = if let Some(optional) = editor.as_optional() {
                optional.set_optional(resolved.clone())?;
                false
            } else if let Some(list) = editor.as_list() {
                list.reconcile(list_value(&self.full_path, &self.model)?)?;
                false
            } else if let Some(leaf) = editor.as_leaf() {
                leaf.set_value(self.model.clone());
                false
            } else {
                if let Some(value_aware) = editor.as_value_aware() {
                    value_aware.set_value(self.model.clone());
                }
                true
            };
            if let Some(delegate_aware) = editor.as_delegate_aware() {
                delegate_aware.set_delegate(EditorDelegate::new(
                    self.full_path.clone(),
                    Rc::clone(&ctx.signals),
                ));
            }
            descend
        };

        if descend {
            for child in &mut self.children {
                child.edit(&self.model, ctx)?;
            }
        }
        if let Some(co_editor) = self.co_editor.as_mut() {
            co_editor.apply(resolved, ctx)?;
        }
        Ok(())
    }

    /// Fail when the plan declares a capability that changes how values
    /// move and neither the instance nor its co-editors provide it.
    fn check_capabilities(&self) -> Result<()> {
        let required = self.declared & Capabilities::REQUIRED_AT_RUNTIME;
        if required.is_empty() {
            return Ok(());
        }
        let mut available = Capabilities::empty();
        let mut node = Some(self);
        while let Some(current) = node {
            available |= Capabilities::of(&mut *current.editor.borrow_mut());
            node = current.co_editor.as_deref();
        }
        let missing = required - available;
        if missing.is_empty() {
            Ok(())
        } else {
            Err(BindingError::MissingCapability {
                path: self.full_path.clone(),
                capability: missing,
            }
            .into())
        }
    }

    // ── Flush ───────────────────────────────────────────────────────────

    /// Flush this node and its co-editors, returning the value the last of
    /// them produced. Used for roots, which have no parent to write into.
    pub(crate) fn flush_root(
        &mut self,
        ctx: &BindContext,
        mut collector: Option<&mut ValueCollector>,
    ) -> Result<Option<Value>> {
        let mut value = self.collect(ctx, collector.as_deref_mut())?;
        if let Some(co_editor) = self.co_editor.as_mut() {
            if let Some(co_value) = co_editor.flush_root(ctx, collector)? {
                value = Some(co_value);
            }
        }
        Ok(value)
    }

    fn flush_into(
        &mut self,
        parent: &Value,
        ctx: &BindContext,
        mut collector: Option<&mut ValueCollector>,
    ) -> Result<()> {
        if let Some(value) = self.collect(ctx, collector.as_deref_mut())? {
            self.write_back(parent, value, ctx)?;
        }
        if let Some(co_editor) = self.co_editor.as_mut() {
            co_editor.flush_into(parent, ctx, collector)?;
        }
        Ok(())
    }

    /// Flush the editor itself. Returns the value it contributes to its
    /// parent, or `None` when only its descendants write.
    fn collect(
        &mut self,
        ctx: &BindContext,
        mut collector: Option<&mut ValueCollector>,
    ) -> Result<Option<Value>> {
        let value = {
            let mut editor = self.editor.borrow_mut();
            trace!(path = %self.full_path, "flush");
            if let Some(optional) = editor.as_optional() {
                Some(optional.flush_chain()?)
            } else if let Some(list) = editor.as_list() {
                Some(list.flush_chain()?)
            } else if editor.as_leaf().is_some() {
                if let Some(value_aware) = editor.as_value_aware() {
                    value_aware.flush();
                }
                let value = editor
                    .as_leaf()
                    .map(|leaf| leaf.get_value())
                    .unwrap_or_default();
                if let Some(collector) = collector.as_deref_mut() {
                    collector.record(self.id, value.clone());
                }
                Some(value)
            } else {
                None
            }
        };
        if value.is_some() {
            return Ok(value);
        }

        for child in &mut self.children {
            child.flush_into(&self.model, ctx, collector.as_deref_mut())?;
        }
        if let Some(value_aware) = self.editor.borrow_mut().as_value_aware() {
            value_aware.flush();
        }
        Ok(None)
    }

    fn write_back(&self, parent: &Value, value: Value, ctx: &BindContext) -> Result<()> {
        if let Ok(Some(current)) = self.path.read(parent) {
            if current == value {
                return Ok(());
            }
        }
        if self.path.is_empty() {
            return match ctx.config.empty_path_writes {
                EmptyPathPolicy::Reject => {
                    Err(DriverError::path(&self.full_path, PathError::EmptyPath))
                }
                EmptyPathPolicy::Ignore => {
                    warn!(path = %self.full_path, "write to the empty path ignored");
                    Ok(())
                }
            };
        }
        let absent = value.is_null();
        match self.path.write(parent, value) {
            Ok(()) => Ok(()),
            Err(PathError::AbsentIntermediate { .. }) if absent => Ok(()),
            Err(source) => Err(DriverError::path(&self.full_path, source)),
        }
    }
}

fn list_value(path: &str, model: &Value) -> Result<Option<ListRef>> {
    match model {
        Value::Null => Ok(None),
        Value::List(list) => Ok(Some(list.clone())),
        other => Err(BindingError::TypeMismatch {
            path: path.to_string(),
            expected: "list",
            found: other.kind(),
        }
        .into()),
    }
}

/// Hand list and optional editors the chain through which they attach
/// their runtime sub-editors.
fn install_chain(
    editor: &EditorRef,
    plan: &PlanNode,
    full: &PropertyPath,
    ctx: &Rc<BindContext>,
) {
    let mut guard = editor.borrow_mut();
    let chain = || {
        let element = plan.element().cloned().unwrap_or_else(PlanNode::root);
        SubtreeChain::new(element, full.clone(), Rc::clone(ctx))
    };
    if let Some(list) = guard.as_list() {
        list.set_editor_chain(Rc::new(chain()));
    } else if let Some(optional) = guard.as_optional() {
        optional.set_editor_chain(Rc::new(chain()));
    }
}
