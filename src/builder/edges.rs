use std::collections::HashMap;

use tracing::debug;

use crate::builder::flow_builder::{EdgeKind, Endpoint, FlowEdge};
use crate::builder::label::HEADER_PORT;
use crate::flow::flow_model::{Attributes, Screen};

/// Map every declared screen name to its node id.
pub fn name_index(screens: &[Screen]) -> HashMap<&str, String> {
    screens.iter().map(|s| (s.name.as_str(), s.id())).collect()
}

/// Node id for `target_name`, or the raw name when no screen declares it.
///
/// The raw fallback lets flows point at nodes outside the document; a typo ends up
/// as a dangling edge rather than an error.
pub fn resolve_target(index: &HashMap<&str, String>, target_name: &str) -> String {
    match index.get(target_name) {
        Some(id) => id.clone(),
        None => {
            debug!(target = target_name, "unresolved action target, using raw name");
            target_name.to_string()
        }
    }
}

/// One edge per target-bearing action, from the action's port to the target's header.
pub fn transition_edges(screens: &[Screen], index: &HashMap<&str, String>) -> Vec<FlowEdge> {
    screens
        .iter()
        .flat_map(|screen| screen.actions.iter())
        .filter_map(|action| {
            let target_name = action.target_name.as_deref()?;
            Some(FlowEdge {
                from: Endpoint::new(action.owner_id(), action.port()),
                to: Endpoint::new(resolve_target(index, target_name), HEADER_PORT),
                kind: EdgeKind::Transition,
                attributes: action.attributes.clone().unwrap_or_default(),
            })
        })
        .collect()
}

/// Header-to-header edges from each screen with only terminal actions to the next one.
///
/// The last screen has no successor and never emits one.
pub fn fallthrough_edges(screens: &[Screen]) -> Vec<FlowEdge> {
    screens
        .windows(2)
        .filter(|pair| pair[0].has_no_real_actions())
        .map(|pair| FlowEdge {
            from: Endpoint::new(pair[0].id(), HEADER_PORT),
            to: Endpoint::new(pair[1].id(), HEADER_PORT),
            kind: EdgeKind::Fallthrough,
            attributes: Attributes::new(),
        })
        .collect()
}
