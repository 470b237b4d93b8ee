//! Error type shared by parsing, building, rendering and the CLI.

use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UiflowError {
    /// The input text is not valid YAML
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document root has the wrong shape
    #[error("Invalid flow document: {0}")]
    InvalidDocument(String),

    /// A screen entry is malformed
    #[error("Invalid screen #{index}: {reason}")]
    InvalidScreen { index: usize, reason: String },

    /// An action record matches none of the recognized shapes
    #[error("Invalid action #{index} on screen '{screen}': {reason}")]
    InvalidAction {
        screen: String,
        index: usize,
        reason: String,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The Graphviz program could not be started
    #[error("Failed to run '{program}' (is Graphviz installed?): {source}")]
    RendererSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The Graphviz program exited with non-zero status
    #[error("'{program}' exited with {status}: {stderr}")]
    RendererFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

impl UiflowError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_action(screen: &str, index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidAction {
            screen: screen.to_string(),
            index,
            reason: reason.into(),
        }
    }
}
