use serde::Deserialize;

use crate::flow::flow_model::{Attributes, Screen};

pub const TOP_BG_COLOR: &str = "#87CEEB";
pub const SEE_COLOR: &str = "#8B0000";
pub const ACTION_COLOR: &str = "#4FBC92";

/// Port of the header cell; incoming edges and fallthrough edges attach here.
pub const HEADER_PORT: &str = "top";

/// Screen attribute keys consumed by the label instead of forwarded to the node.
pub const RESERVED_STYLE_KEYS: [&str; 3] = ["top_bg_color", "see_color", "action_color"];

// ============================================================================
// Palette
// ============================================================================

/// Colors of the three row kinds in a screen's table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub top_bg_color: String,
    pub see_color: String,
    pub action_color: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            top_bg_color: TOP_BG_COLOR.to_string(),
            see_color: SEE_COLOR.to_string(),
            action_color: ACTION_COLOR.to_string(),
        }
    }
}

/// A screen's styling, split into the label palette and plain node attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenStyle {
    pub palette: Palette,
    pub node_attributes: Attributes,
}

impl ScreenStyle {
    /// Read the reserved keys over `defaults`; everything else is copied through.
    ///
    /// `attributes` is left untouched.
    pub fn split(attributes: &Attributes, defaults: &Palette) -> Self {
        let pick = |key: &str, fallback: &str| {
            attributes
                .get(key)
                .cloned()
                .unwrap_or_else(|| fallback.to_string())
        };

        let palette = Palette {
            top_bg_color: pick("top_bg_color", &defaults.top_bg_color),
            see_color: pick("see_color", &defaults.see_color),
            action_color: pick("action_color", &defaults.action_color),
        };

        let node_attributes = attributes
            .iter()
            .filter(|(key, _)| !RESERVED_STYLE_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            palette,
            node_attributes,
        }
    }
}

// ============================================================================
// Label rows
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelRow {
    /// Screen name on a colored background, anchored at [`HEADER_PORT`]
    Header { name: String, bg_color: String },

    /// One visible item
    See { label: String, color: String },

    /// One action, anchored at the action's port
    Action {
        event: String,
        port: String,
        color: String,
    },
}

impl LabelRow {
    fn to_html(&self) -> String {
        match self {
            LabelRow::Header { name, bg_color } => format!(
                r#"<tr><td port="{HEADER_PORT}" bgcolor="{}"><B>{}</B></td></tr>"#,
                escape_html(bg_color),
                escape_html(name)
            ),
            LabelRow::See { label, color } => format!(
                r#"<tr><td><font color="{}"><B>{}</B></font></td></tr>"#,
                escape_html(color),
                escape_html(label)
            ),
            LabelRow::Action { event, port, color } => format!(
                r#"<tr><td port="{}"><font color="{}"><B>{}</B></font></td></tr>"#,
                escape_html(port),
                escape_html(color),
                escape_html(event)
            ),
        }
    }
}

/// The table shown inside a screen's node: header, see rows, action rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLabel {
    pub rows: Vec<LabelRow>,
}

impl NodeLabel {
    pub fn for_screen(screen: &Screen, palette: &Palette) -> Self {
        let mut rows = Vec::with_capacity(1 + screen.visible_items.len() + screen.actions.len());

        rows.push(LabelRow::Header {
            name: screen.name.clone(),
            bg_color: palette.top_bg_color.clone(),
        });

        rows.extend(screen.visible_items.iter().map(|item| LabelRow::See {
            label: item.label.clone(),
            color: palette.see_color.clone(),
        }));

        rows.extend(screen.actions.iter().map(|action| LabelRow::Action {
            event: action.event.clone(),
            port: action.port(),
            color: palette.action_color.clone(),
        }));

        Self { rows }
    }

    /// Graphviz HTML-like markup, without the outer `<` `>` delimiters.
    pub fn to_html(&self) -> String {
        let mut lines = vec![r#"<table border="0" cellborder="1" cellspacing="0">"#.to_string()];
        lines.extend(self.rows.iter().map(LabelRow::to_html));
        lines.push("</table>".to_string());
        lines.join("\n\t\t")
    }

    pub fn see_rows(&self) -> impl Iterator<Item = &LabelRow> {
        self.rows.iter().filter(|r| matches!(r, LabelRow::See { .. }))
    }

    pub fn action_rows(&self) -> impl Iterator<Item = &LabelRow> {
        self.rows.iter().filter(|r| matches!(r, LabelRow::Action { .. }))
    }
}

/// Escape text for use inside an HTML-like label.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_specific_cases() {
        assert_eq!(escape_html("plain"), "plain");
        assert_eq!(escape_html("a < b"), "a &lt; b");
        assert_eq!(escape_html("Tom & Jerry"), "Tom &amp; Jerry");
        assert_eq!(escape_html(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_html("ログイン"), "ログイン");
    }

    #[test]
    fn split_leaves_source_attributes_intact() {
        let mut attrs = Attributes::new();
        attrs.insert("see_color".into(), "blue".into());
        attrs.insert("color".into(), "red".into());
        let before = attrs.clone();

        let style = ScreenStyle::split(&attrs, &Palette::default());

        assert_eq!(attrs, before);
        assert_eq!(style.palette.see_color, "blue");
        assert_eq!(style.palette.top_bg_color, TOP_BG_COLOR);
        assert_eq!(style.node_attributes.len(), 1);
        assert_eq!(style.node_attributes.get("color").map(String::as_str), Some("red"));
    }
}
