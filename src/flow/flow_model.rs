use std::collections::BTreeMap;

use crate::flow::identity::{action_port, screen_id};

/// Free-form styling carried from the document to the renderer.
pub type Attributes = BTreeMap<String, String>;

// ============================================================================
// Screen
// ============================================================================

/// One UI state: a node in the flow graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    /// Human-readable name, also the source of the node id
    pub name: String,

    /// What the user sees, top to bottom
    pub visible_items: Vec<VisibleItem>,

    /// What the user can do, top to bottom
    pub actions: Vec<Action>,

    /// Node styling, including the reserved palette keys
    pub extra_attributes: Attributes,
}

impl Screen {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible_items: Vec::new(),
            actions: Vec::new(),
            extra_attributes: Attributes::new(),
        }
    }

    /// Stable node identifier derived from the name.
    pub fn id(&self) -> String {
        screen_id(&self.name)
    }

    pub fn with_see(mut self, label: impl Into<String>) -> Self {
        self.visible_items.push(VisibleItem::new(label));
        self
    }

    /// Append an action owned by this screen.
    pub fn with_action(mut self, event: impl Into<String>, target_name: Option<&str>) -> Self {
        let action = Action::new(self.id(), event, target_name.map(str::to_string));
        self.actions.push(action);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_attributes.insert(key.into(), value.into());
        self
    }

    /// True when the screen declares actions but none of them leads anywhere.
    ///
    /// A screen without any action is not covered: it simply ends the flow.
    pub fn has_no_real_actions(&self) -> bool {
        !self.actions.is_empty() && self.actions.iter().all(|a| a.target_name.is_none())
    }
}

// ============================================================================
// Visible item
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleItem {
    pub label: String,
}

impl VisibleItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

// ============================================================================
// Action
// ============================================================================

/// Something the user can do on a screen, optionally moving to another screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    owner_id: String,

    /// Event name shown in the action row
    pub event: String,

    /// Name of the destination screen; `None` for terminal actions
    pub target_name: Option<String>,

    /// Edge styling for the transition
    pub attributes: Option<Attributes>,
}

impl Action {
    /// An empty `target_name` is treated as no target.
    pub fn new(owner_id: impl Into<String>, event: impl Into<String>, target_name: Option<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            event: event.into(),
            target_name: target_name.filter(|t| !t.is_empty()),
            attributes: None,
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Id of the screen this action belongs to.
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Port anchoring this action's edge inside the owner's table.
    pub fn port(&self) -> String {
        action_port(&self.owner_id, &self.event, self.target_name.as_deref())
    }
}
