#![forbid(unsafe_code)]

//! Binding plans.
//!
//! A [`BindingPlan`] is the precomputed, immutable description of an editor
//! tree: which sub-editor slot is bound to which property path, and which
//! capabilities each slot was declared with. Plans are produced outside
//! the engine (by hand, by a build step, or from JSON) and are never
//! mutated by a driver.
//!
//! Declared capabilities describe the *slot*, not the instance that ends
//! up in it. Drivers re-query every instance on every visit and only use
//! the declaration to detect instances that lack a capability the plan
//! relies on.

use edrv_model::PropertyPath;
use serde::{Deserialize, Serialize};

use crate::capability::Capabilities;

/// One slot of an editor tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanNode {
    field: String,
    path: PropertyPath,
    #[serde(default)]
    declared: Capabilities,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<PlanNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    element: Option<Box<PlanNode>>,
}

impl PlanNode {
    /// The root slot: bound to the model itself.
    #[must_use]
    pub fn root() -> Self {
        Self {
            field: String::new(),
            path: PropertyPath::empty(),
            declared: Capabilities::COMPOSITE,
            children: Vec::new(),
            element: None,
        }
    }

    /// A slot read from the parent editor's `field`, bound to the property
    /// of the same name with any trailing `Editor` suffix removed.
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        let field = field.into();
        let path = PropertyPath::parse(default_path(&field));
        Self {
            field,
            path,
            declared: Capabilities::empty(),
            children: Vec::new(),
            element: None,
        }
    }

    #[must_use]
    pub fn leaf(field: impl Into<String>) -> Self {
        Self::new(field).declares(Capabilities::LEAF_VALUE)
    }

    #[must_use]
    pub fn composite(field: impl Into<String>) -> Self {
        Self::new(field).declares(Capabilities::COMPOSITE)
    }

    /// A list slot whose sub-editors are bound according to `element`.
    #[must_use]
    pub fn list(field: impl Into<String>, element: PlanNode) -> Self {
        Self::new(field)
            .declares(Capabilities::LIST)
            .with_element(element)
    }

    /// An optional slot whose delegate editor is bound according to `element`.
    #[must_use]
    pub fn optional(field: impl Into<String>, element: PlanNode) -> Self {
        Self::new(field)
            .declares(Capabilities::OPTIONAL)
            .with_element(element)
    }

    /// Bind the slot to `path` instead of the default. `""` binds it to
    /// the parent's model itself.
    #[must_use]
    pub fn at(mut self, path: impl Into<PropertyPath>) -> Self {
        self.path = path.into();
        self
    }

    #[must_use]
    pub fn declares(mut self, capabilities: Capabilities) -> Self {
        self.declared |= capabilities;
        self
    }

    #[must_use]
    pub fn child(mut self, child: PlanNode) -> Self {
        self.declared |= Capabilities::COMPOSITE;
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_element(mut self, element: PlanNode) -> Self {
        self.element = Some(Box::new(element));
        self
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub fn path(&self) -> &PropertyPath {
        &self.path
    }

    #[must_use]
    pub fn declared(&self) -> Capabilities {
        self.declared
    }

    #[must_use]
    pub fn children(&self) -> &[PlanNode] {
        &self.children
    }

    #[must_use]
    pub fn element(&self) -> Option<&PlanNode> {
        self.element.as_deref()
    }

    /// Number of slots in this subtree, element plans excluded.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        1 + self.children.iter().map(PlanNode::slot_count).sum::<usize>()
    }
}

fn default_path(field: &str) -> &str {
    match field.strip_suffix("Editor") {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => field,
    }
}

/// The plan for a whole editor tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingPlan {
    root: PlanNode,
}

impl BindingPlan {
    #[must_use]
    pub fn new(root: PlanNode) -> Self {
        Self { root }
    }

    /// Plan for a root editor with no sub-editor slots, such as a single
    /// leaf or a list editor with leaf elements.
    #[must_use]
    pub fn leaf() -> Self {
        Self::new(PlanNode::root())
    }

    #[must_use]
    pub fn root(&self) -> &PlanNode {
        &self.root
    }
}

impl Default for BindingPlan {
    fn default() -> Self {
        Self::leaf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_strips_editor_suffix() {
        assert_eq!(PlanNode::new("addressEditor").path().to_string(), "address");
        assert_eq!(PlanNode::new("name").path().to_string(), "name");
        assert_eq!(PlanNode::new("Editor").path().to_string(), "Editor");
        assert_eq!(PlanNode::new("addressEditor").field(), "addressEditor");
    }

    #[test]
    fn at_overrides_path() {
        let node = PlanNode::leaf("nameEditor2").at("");
        assert!(node.path().is_empty());
        let node = PlanNode::leaf("cityEditor").at("item.city");
        assert_eq!(node.path().segments(), ["item", "city"]);
    }

    #[test]
    fn builders_accumulate_capabilities() {
        let node = PlanNode::new("managerName")
            .declares(Capabilities::VALUE_AWARE)
            .child(PlanNode::leaf("name"));
        assert!(node.declared().contains(Capabilities::COMPOSITE));
        assert!(node.declared().contains(Capabilities::VALUE_AWARE));
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.slot_count(), 2);

        let list = PlanNode::list("addressesEditor", PlanNode::root().child(PlanNode::leaf("city")));
        assert_eq!(list.declared(), Capabilities::LIST);
        assert_eq!(list.element().map(PlanNode::slot_count), Some(2));
    }

    #[test]
    fn plans_deserialize_from_json() {
        let json = r#"{
            "field": "",
            "path": "",
            "declared": "COMPOSITE",
            "children": [
                { "field": "nameEditor", "path": "name", "declared": "LEAF_VALUE" },
                {
                    "field": "addressesEditor",
                    "path": "addresses",
                    "declared": "LIST",
                    "element": {
                        "field": "",
                        "path": "",
                        "declared": "COMPOSITE",
                        "children": [{ "field": "city", "path": "city", "declared": "LEAF_VALUE" }]
                    }
                }
            ]
        }"#;
        let plan: BindingPlan = serde_json::from_str(json).expect("plan");
        let expected = BindingPlan::new(
            PlanNode::root()
                .child(PlanNode::leaf("nameEditor"))
                .child(PlanNode::list(
                    "addressesEditor",
                    PlanNode::root().child(PlanNode::leaf("city")),
                )),
        );
        assert_eq!(plan, expected);

        let rendered = serde_json::to_string(&plan).expect("render");
        let back: BindingPlan = serde_json::from_str(&rendered).expect("reparse");
        assert_eq!(back, plan);
    }
}
