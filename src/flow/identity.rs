use sha2::{Digest, Sha256};

/// Prefix for screen node identifiers. Graphviz ids may not start with a digit.
pub const SCREEN_ID_PREFIX: &str = "i";

/// Prefix for action port identifiers.
pub const PORT_PREFIX: &str = "p";

/// Hex-encoded SHA-256 of the UTF-8 bytes of `text`.
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Node identifier of the screen called `name`.
///
/// Screens declared twice under the same name share an id, so Graphviz merges them.
pub fn screen_id(name: &str) -> String {
    format!("{SCREEN_ID_PREFIX}{}", content_hash(name))
}

/// Port identifier of an action row inside its owner's table.
pub fn action_port(owner_id: &str, event: &str, target_name: Option<&str>) -> String {
    let key = format!("{owner_id}{event}{}", target_name.unwrap_or(""));
    format!("{PORT_PREFIX}{}", content_hash(&key))
}
