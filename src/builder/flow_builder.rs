use tracing::{debug, warn};

use crate::builder::edges::{fallthrough_edges, name_index, transition_edges};
use crate::builder::label::{NodeLabel, Palette, ScreenStyle};
use crate::flow::flow_model::{Attributes, Screen};

// ============================================================================
// Graph data model
// ============================================================================

/// A node anchor: node id plus a port inside its table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub node: String,
    pub port: String,
}

impl Endpoint {
    pub fn new(node: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            port: port.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Declared by an action with a target
    Transition,

    /// Inserted between consecutive screens when the first has only terminal actions
    Fallthrough,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowEdge {
    pub from: Endpoint,
    pub to: Endpoint,
    pub kind: EdgeKind,
    pub attributes: Attributes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowNode {
    pub id: String,
    pub label: NodeLabel,

    /// Node styling left after the palette keys were consumed
    pub attributes: Attributes,
}

/// Everything the emitter needs: rendered nodes and resolved edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    pub fn edges_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &FlowEdge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }

    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Turns an ordered list of screens into a [`FlowGraph`].
#[derive(Debug, Clone, Default)]
pub struct FlowBuilder {
    palette: Palette,
}

impl FlowBuilder {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Build all nodes, then resolve edges against the complete name index.
    pub fn build(&self, screens: &[Screen]) -> FlowGraph {
        let nodes: Vec<FlowNode> = screens.iter().map(|s| self.build_node(s)).collect();

        let index = name_index(screens);
        let mut edges = transition_edges(screens, &index);
        edges.extend(fallthrough_edges(screens));

        debug!(nodes = nodes.len(), edges = edges.len(), "built flow graph");
        FlowGraph { nodes, edges }
    }

    fn build_node(&self, screen: &Screen) -> FlowNode {
        let mut style = ScreenStyle::split(&screen.extra_attributes, &self.palette);
        if style.node_attributes.remove("label").is_some() {
            warn!(screen = %screen.name, "ignoring 'label' attribute; the label is generated");
        }

        FlowNode {
            id: screen.id(),
            label: NodeLabel::for_screen(screen, &style.palette),
            attributes: style.node_attributes,
        }
    }
}
