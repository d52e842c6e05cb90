#![forbid(unsafe_code)]

//! The editor driver state machine.
//!
//! See [`DriverState`] for the transitions.
//!
//! `edit` before `initialize` and `flush` before `edit` fail with
//! [`DriverError::IllegalLifecycle`] and leave the driver untouched.
//!
//! # Failure Modes
//!
//! A binding failure aborts the pass it occurs in. Writes already made by
//! that pass are not rolled back. A failed `edit` unbinds the model and
//! drops back to [`DriverState::Initialized`], so `flush` is refused until
//! the next successful edit; a failed `flush` leaves the state alone.

use std::cell::RefCell;
use std::rc::Rc;

use edrv_core::{BindingPlan, DriverError, DriverState, Editor, EditorRef, Result, editor_ref};
use edrv_model::{PropertyPath, Value};
use tracing::{debug, debug_span, warn};

use crate::collector::ValueCollector;
use crate::config::DriverConfig;
use crate::node::{BindContext, EditorNode};

/// Binds one editor tree to a model.
pub struct EditorDriver {
    plan: BindingPlan,
    config: DriverConfig,
    state: DriverState,
    bound: Option<Bound>,
    model: Value,
    collector: ValueCollector,
}

struct Bound {
    root: EditorNode,
    ctx: Rc<BindContext>,
}

impl EditorDriver {
    #[must_use]
    pub fn new(plan: BindingPlan) -> Self {
        Self::with_config(plan, DriverConfig::default())
    }

    /// Out-of-range config values are logged and replaced by their
    /// defaults.
    #[must_use]
    pub fn with_config(plan: BindingPlan, config: DriverConfig) -> Self {
        let config = config.sanitized();
        Self {
            plan,
            config,
            state: DriverState::Uninitialized,
            bound: None,
            model: Value::Null,
            collector: ValueCollector::default(),
        }
    }

    /// Capture `editor`'s sub-editor tree. Always allowed; any previously
    /// bound model is forgotten and previously issued delegates go stale.
    pub fn initialize<E: Editor>(&mut self, editor: &Rc<RefCell<E>>) {
        self.initialize_ref(editor_ref(editor));
    }

    pub fn initialize_ref(&mut self, editor: EditorRef) {
        let ctx = BindContext::new(self.config.clone());
        let root = EditorNode::bind(self.plan.root(), editor, &PropertyPath::empty(), &ctx);
        debug!(nodes = root.count(), previous = %self.state, "driver initialized");
        self.bound = Some(Bound { root, ctx });
        self.model = Value::Null;
        self.collector.clear();
        self.state = DriverState::Initialized;
    }

    /// Push `model` into the editor tree.
    pub fn edit(&mut self, model: impl Into<Value>) -> Result<()> {
        let Some(bound) = self.bound.as_mut() else {
            return Err(self.illegal("edit"));
        };
        let model = model.into();
        let span = debug_span!("edrv.edit", nodes = bound.root.count(), model = model.kind());
        let _guard = span.enter();

        if let Err(err) = bound.root.edit(&model, &bound.ctx) {
            // The tree may be half bound to `model`; refuse flush until an
            // edit succeeds.
            debug!(error = %err, previous = %self.state, "edit failed, model unbound");
            self.state = DriverState::Initialized;
            self.model = Value::Null;
            self.collector.clear();
            return Err(err);
        }
        bound.ctx.signals.reset();
        if self.config.track_dirty {
            self.collector.capture(&bound.root);
            debug!(leaves = self.collector.len(), "leaf snapshot taken");
        }
        self.model = model;
        self.state = DriverState::Editing;
        Ok(())
    }

    /// Pull edited values out of the editor tree and write them into the
    /// model. Returns the root editor's value when it produces one (a leaf
    /// or list root), otherwise the model itself.
    pub fn flush(&mut self) -> Result<Value> {
        if self.state != DriverState::Editing {
            return Err(self.illegal("flush"));
        }
        let Some(bound) = self.bound.as_mut() else {
            return Err(self.illegal("flush"));
        };
        let span = debug_span!("edrv.flush", nodes = bound.root.count());
        let _guard = span.enter();

        let collector = self.config.track_dirty.then_some(&mut self.collector);
        let value = bound.root.flush_root(&bound.ctx, collector)?;
        bound.ctx.signals.reset();
        Ok(value.unwrap_or_else(|| self.model.clone()))
    }

    /// Whether a delegate reported pending changes, or a leaf editor no
    /// longer holds the value last edited or flushed.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        let Some(bound) = self.bound.as_ref() else {
            return false;
        };
        if bound.ctx.signals.is_dirty() {
            return true;
        }
        self.state == DriverState::Editing
            && self.config.track_dirty
            && self.collector.differs(&bound.root)
    }

    /// Whether a delegate asked for a flush since the last edit or flush.
    #[must_use]
    pub fn flush_requested(&self) -> bool {
        self.bound
            .as_ref()
            .is_some_and(|bound| bound.ctx.signals.flush_requested())
    }

    #[must_use]
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// The model passed to the last successful edit, or `Null` after a
    /// failed one.
    #[must_use]
    pub fn model(&self) -> &Value {
        &self.model
    }

    #[must_use]
    pub fn plan(&self) -> &BindingPlan {
        &self.plan
    }

    #[must_use]
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    fn illegal(&self, operation: &'static str) -> DriverError {
        warn!(operation, state = %self.state, "driver used out of order");
        DriverError::IllegalLifecycle {
            operation,
            state: self.state,
        }
    }
}

impl std::fmt::Debug for EditorDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorDriver")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}
