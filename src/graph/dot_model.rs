use std::fmt;

/// Attribute value as written into the DOT text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Quoted string
    Text(String),

    /// HTML-like label, wrapped in `<` `>`
    Html(String),
}

impl AttrValue {
    pub fn text(value: impl Into<String>) -> Self {
        AttrValue::Text(value.into())
    }

    fn render(&self) -> String {
        match self {
            AttrValue::Text(s) => quote(s),
            AttrValue::Html(s) => format!("<{s}>"),
        }
    }
}

pub type AttrList = Vec<(String, AttrValue)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotNode {
    pub id: String,
    pub attributes: AttrList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotEdge {
    pub source: String,
    pub source_port: Option<String>,
    pub target: String,
    pub target_port: Option<String>,
    pub attributes: AttrList,
}

/// A directed graph in Graphviz DOT form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotGraph {
    pub name: String,
    pub graph_defaults: AttrList,
    pub node_defaults: AttrList,
    pub edge_defaults: AttrList,
    pub nodes: Vec<DotNode>,
    pub edges: Vec<DotEdge>,
}

impl DotGraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graph_defaults: Vec::new(),
            node_defaults: Vec::new(),
            edge_defaults: Vec::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn set_graph_defaults(&mut self, attributes: AttrList) {
        self.graph_defaults = attributes;
    }

    pub fn set_node_defaults(&mut self, attributes: AttrList) {
        self.node_defaults = attributes;
    }

    pub fn set_edge_defaults(&mut self, attributes: AttrList) {
        self.edge_defaults = attributes;
    }

    pub fn add_node(&mut self, node: DotNode) {
        self.nodes.push(node);
    }

    pub fn add_edge(&mut self, edge: DotEdge) {
        self.edges.push(edge);
    }

    /// Serialize as DOT source text.
    pub fn to_dot_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DotGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph {} {{", quote(&self.name))?;

        for (keyword, defaults) in [
            ("graph", &self.graph_defaults),
            ("node", &self.node_defaults),
            ("edge", &self.edge_defaults),
        ] {
            if !defaults.is_empty() {
                writeln!(f, "{keyword}{};", attr_block(defaults))?;
            }
        }

        for node in &self.nodes {
            writeln!(f, "{}{};", quote(&node.id), attr_block(&node.attributes))?;
        }

        for edge in &self.edges {
            writeln!(
                f,
                "{} -> {}{};",
                endpoint(&edge.source, edge.source_port.as_deref()),
                endpoint(&edge.target, edge.target_port.as_deref()),
                attr_block(&edge.attributes)
            )?;
        }

        writeln!(f, "}}")
    }
}

fn attr_block(attributes: &AttrList) -> String {
    if attributes.is_empty() {
        return String::new();
    }
    let items: Vec<String> = attributes
        .iter()
        .map(|(key, value)| format!("{}={}", quote(key), value.render()))
        .collect();
    format!(" [{}]", items.join(", "))
}

fn endpoint(node: &str, port: Option<&str>) -> String {
    match port {
        Some(port) => format!("{}:{}", quote(node), quote(port)),
        None => quote(node),
    }
}

/// Quote a DOT id, escaping characters that would end or break the string.
pub fn quote(s: &str) -> String {
    format!("\"{}\"", escape_dot_string(s))
}

fn escape_dot_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_dot_string_specific_cases() {
        assert_eq!(escape_dot_string("normal"), "normal");
        assert_eq!(escape_dot_string("with\"quote"), "with\\\"quote");
        assert_eq!(escape_dot_string("with\\backslash"), "with\\\\backslash");
        assert_eq!(escape_dot_string("with\nnewline"), "with\\nnewline");
    }

    #[test]
    fn empty_graph_has_only_braces() {
        let dot = DotGraph::new("G").to_dot_string();
        assert_eq!(dot, "digraph \"G\" {\n}\n");
    }

    #[test]
    fn edge_with_ports_is_quoted() {
        let mut graph = DotGraph::new("G");
        graph.add_edge(DotEdge {
            source: "a".into(),
            source_port: Some("p1".into()),
            target: "Some Screen".into(),
            target_port: Some("top".into()),
            attributes: vec![("color".into(), AttrValue::text("red"))],
        });
        let dot = graph.to_dot_string();
        assert!(dot.contains(r#""a":"p1" -> "Some Screen":"top" ["color"="red"];"#));
        assert_eq!(format!("{graph}"), dot);
    }
}
