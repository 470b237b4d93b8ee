use crate::builder::flow_builder::{FlowEdge, FlowGraph, FlowNode};
use crate::flow::flow_model::Attributes;
use crate::graph::dot_model::{AttrList, AttrValue, DotEdge, DotGraph, DotNode};

pub const GRAPH_NAME: &str = "G";
pub const FONT_NAME: &str = "M+ 1m,Osaka-Mono,ＭＳ ゴシック";
pub const EDGE_COLOR: &str = "#777777";

fn attrs(pairs: &[(&str, &str)]) -> AttrList {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), AttrValue::text(*value)))
        .collect()
}

pub fn graph_defaults() -> AttrList {
    attrs(&[("charset", "UTF-8"), ("style", "filled"), ("rankdir", "LR")])
}

pub fn node_defaults() -> AttrList {
    attrs(&[
        ("style", "solid"),
        ("fontsize", "11"),
        ("margin", "0.1,0.1"),
        ("fontname", FONT_NAME),
    ])
}

pub fn edge_defaults() -> AttrList {
    attrs(&[("fontsize", "9"), ("fontname", FONT_NAME), ("color", EDGE_COLOR)])
}

/// Map a built flow graph onto DOT nodes and edges with the standard styling.
pub fn emit(flow: &FlowGraph) -> DotGraph {
    let mut dot = DotGraph::new(GRAPH_NAME);
    dot.set_graph_defaults(graph_defaults());
    dot.set_node_defaults(node_defaults());
    dot.set_edge_defaults(edge_defaults());

    for node in &flow.nodes {
        dot.add_node(emit_node(node));
    }
    for edge in &flow.edges {
        dot.add_edge(emit_edge(edge));
    }
    dot
}

fn emit_node(node: &FlowNode) -> DotNode {
    let mut attributes = vec![
        ("label".to_string(), AttrValue::Html(node.label.to_html())),
        ("shape".to_string(), AttrValue::text("plaintext")),
    ];
    // Screen styling may override the shape.
    attributes.retain(|(key, _)| !node.attributes.contains_key(key));
    attributes.extend(styling(&node.attributes));

    DotNode {
        id: node.id.clone(),
        attributes,
    }
}

fn emit_edge(edge: &FlowEdge) -> DotEdge {
    DotEdge {
        source: edge.from.node.clone(),
        source_port: Some(edge.from.port.clone()),
        target: edge.to.node.clone(),
        target_port: Some(edge.to.port.clone()),
        attributes: styling(&edge.attributes),
    }
}

fn styling(attributes: &Attributes) -> AttrList {
    attributes
        .iter()
        .map(|(key, value)| (key.clone(), AttrValue::text(value.clone())))
        .collect()
}
