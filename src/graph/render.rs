use std::io::Write;
use std::process::{Command, Stdio};

use clap::ValueEnum;
use tracing::debug;

use crate::error::UiflowError;
use crate::graph::dot_model::DotGraph;

pub const DEFAULT_RENDERER: &str = "dot";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Graphviz DOT source
    #[default]
    Dot,
    Png,
    Svg,
}

impl OutputFormat {
    /// Graphviz `-T` output type, `None` when no rendering is needed.
    pub fn graphviz_type(self) -> Option<&'static str> {
        match self {
            OutputFormat::Dot => None,
            OutputFormat::Png => Some("png"),
            OutputFormat::Svg => Some("svg"),
        }
    }
}

/// Serializes a [`DotGraph`] into the requested output encoding.
///
/// Image formats are produced by piping DOT source through the Graphviz program.
#[derive(Debug, Clone)]
pub struct Renderer {
    program: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_RENDERER)
    }
}

impl Renderer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn render(&self, graph: &DotGraph, format: OutputFormat) -> Result<Vec<u8>, UiflowError> {
        let source = graph.to_dot_string();
        match format.graphviz_type() {
            None => Ok(source.into_bytes()),
            Some(kind) => self.run_graphviz(kind, source.into_bytes()),
        }
    }

    fn run_graphviz(&self, kind: &str, source: Vec<u8>) -> Result<Vec<u8>, UiflowError> {
        debug!(program = %self.program, kind, "rendering through graphviz");

        let spawn_error = |source: std::io::Error| UiflowError::RendererSpawn {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .arg(format!("-T{kind}"))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        // Feed stdin from a thread so a large image cannot fill stdout while we still write.
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| spawn_error(std::io::Error::other("stdin not captured")))?;
        let writer = std::thread::spawn(move || stdin.write_all(&source));

        let output = child.wait_with_output().map_err(spawn_error)?;
        let written = writer
            .join()
            .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));

        if !output.status.success() {
            return Err(UiflowError::RendererFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        written.map_err(spawn_error)?;
        Ok(output.stdout)
    }
}
