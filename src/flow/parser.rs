use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::UiflowError;
use crate::flow::flow_model::{Action, Attributes, Screen};

// ============================================================================
// Action record shapes
// ============================================================================

/// One entry of a screen's `action` list, discriminated by its YAML shape.
///
/// ```yaml
/// action:
///   - logout                 # Event
///   - open: Settings         # Transition
///   - event: buy             # Detailed
///     node: Checkout
///     color: red
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ActionSpec {
    /// Bare event name, no transition
    Event(String),

    /// Single-key mapping `{event: target}`; a null or empty target means no transition
    Transition { event: String, target: Option<String> },

    /// Multi-key mapping with `event`, `node` and edge styling
    Detailed {
        event: String,
        target: Option<String>,
        attributes: Attributes,
    },
}

impl ActionSpec {
    /// Classify a raw action record. The error is a human-readable reason.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        if let Some(event) = scalar_text(value) {
            return Ok(ActionSpec::Event(event));
        }

        let Value::Mapping(map) = value else {
            return Err(format!(
                "expected an event name or a mapping, found {}",
                kind_of(value)
            ));
        };

        match map.len() {
            0 => Err("empty mapping".to_string()),
            1 => {
                let (key, target) = map
                    .iter()
                    .next()
                    .ok_or_else(|| "empty mapping".to_string())?;
                let event = scalar_text(key).ok_or("event name must be a scalar")?;
                let target = optional_target(target)?;
                Ok(ActionSpec::Transition { event, target })
            }
            _ => {
                let mut rest = map.clone();
                let event = rest
                    .remove("event")
                    .ok_or("multi-key action requires an 'event' key")?;
                let event = scalar_text(&event).ok_or("'event' must be a scalar")?;
                let target = rest
                    .remove("node")
                    .ok_or("multi-key action requires a 'node' key")?;
                let target = optional_target(&target)?;
                let attributes = attributes_from(&rest).map_err(|e| e.to_string())?;
                Ok(ActionSpec::Detailed {
                    event,
                    target,
                    attributes,
                })
            }
        }
    }

    /// Attach the record to the screen with id `owner_id`.
    pub fn into_action(self, owner_id: &str) -> Action {
        match self {
            ActionSpec::Event(event) => Action::new(owner_id, event, None),
            ActionSpec::Transition { event, target } => Action::new(owner_id, event, target),
            ActionSpec::Detailed {
                event,
                target,
                attributes,
            } => Action::new(owner_id, event, target).with_attributes(attributes),
        }
    }
}

// ============================================================================
// Document parsing
// ============================================================================

/// Parse a flow document into screens, in declaration order.
pub fn parse_flows(text: &str) -> Result<Vec<Screen>, UiflowError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let document: Value = serde_yaml::from_str(text)?;
    let entries = match document {
        Value::Null => return Ok(Vec::new()),
        Value::Sequence(entries) => entries,
        other => {
            return Err(UiflowError::InvalidDocument(format!(
                "expected a list of screens, found {}",
                kind_of(&other)
            )));
        }
    };

    let screens = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_screen(index, entry))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(screens = screens.len(), "parsed flow document");
    Ok(screens)
}

fn parse_screen(index: usize, entry: &Value) -> Result<Screen, UiflowError> {
    let invalid = |reason: String| UiflowError::InvalidScreen { index, reason };

    let Value::Mapping(map) = entry else {
        return Err(invalid(format!("expected a mapping, found {}", kind_of(entry))));
    };
    let mut rest = map.clone();

    let name = rest
        .remove("name")
        .ok_or_else(|| invalid("missing 'name'".to_string()))?;
    let name = scalar_text(&name).ok_or_else(|| invalid("'name' must be a scalar".to_string()))?;
    let mut screen = Screen::new(name);

    for item in take_list(&mut rest, "see").map_err(invalid)? {
        let label = scalar_text(&item)
            .ok_or_else(|| invalid(format!("'see' entries must be scalars, found {}", kind_of(&item))))?;
        screen = screen.with_see(label);
    }

    let owner_id = screen.id();
    for (i, record) in take_list(&mut rest, "action").map_err(invalid)?.iter().enumerate() {
        let spec = ActionSpec::from_value(record)
            .map_err(|reason| UiflowError::invalid_action(&screen.name, i, reason))?;
        screen.actions.push(spec.into_action(&owner_id));
    }

    screen.extra_attributes = attributes_from(&rest)?;
    Ok(screen)
}

/// Remove `key` from the mapping, treating absent or null as an empty list.
fn take_list(map: &mut Mapping, key: &str) -> Result<Vec<Value>, String> {
    match map.remove(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Sequence(items)) => Ok(items),
        Some(other) => Err(format!("'{key}' must be a list, found {}", kind_of(&other))),
    }
}

fn optional_target(value: &Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        other => scalar_text(other)
            .map(Some)
            .ok_or_else(|| format!("target must be a screen name, found {}", kind_of(other))),
    }
}

/// Stringify the remaining keys of a mapping as styling attributes.
fn attributes_from(map: &Mapping) -> Result<Attributes, UiflowError> {
    let mut attributes = Attributes::new();
    for (key, value) in map {
        let Some(key) = scalar_text(key) else {
            return Err(UiflowError::InvalidDocument(format!(
                "attribute keys must be scalars, found {}",
                kind_of(key)
            )));
        };
        let value = match value {
            Value::Null => String::new(),
            other => match scalar_text(other) {
                Some(text) => text,
                None => serde_yaml::to_string(other)?.trim_end().to_string(),
            },
        };
        attributes.insert(key, value);
    }
    Ok(attributes)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
