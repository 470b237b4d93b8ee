use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::builder::label::Palette;
use crate::error::UiflowError;
use crate::graph::render::{OutputFormat, Renderer};

/// What a successful conversion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertSummary {
    pub nodes: usize,
    pub edges: usize,
    pub bytes: usize,
}

// ============================================================================
// convert
// ============================================================================

/// Read a flow document, render it, and write the result to `output`.
///
/// The output file is only replaced once rendering has fully succeeded.
pub fn cmd_convert(
    input: &str,
    output: &str,
    format: OutputFormat,
    palette: &Palette,
    renderer: &Renderer,
) -> Result<ConvertSummary, UiflowError> {
    let text = std::fs::read_to_string(input).map_err(|e| UiflowError::io(input, e))?;

    let graph = crate::convert(&text, palette)?;
    let bytes = renderer.render(&graph, format)?;

    write_atomically(Path::new(output), &bytes)?;

    let summary = ConvertSummary {
        nodes: graph.nodes.len(),
        edges: graph.edges.len(),
        bytes: bytes.len(),
    };
    info!(
        input,
        output,
        ?format,
        nodes = summary.nodes,
        edges = summary.edges,
        "wrote flow graph"
    );
    Ok(summary)
}

// ============================================================================
// Helpers
// ============================================================================

/// Mode for newly created output files on unix.
#[cfg(unix)]
pub const DEFAULT_OUTPUT_MODE: u32 = 0o644;

/// Write through a temp file in the destination directory, then rename over `path`.
///
/// A replaced file keeps its permissions; a new one gets ordinary file permissions
/// rather than the temp file's owner-only mode.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), UiflowError> {
    let display = path.display().to_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|e| UiflowError::io(&display, e))?;
    file.write_all(bytes).map_err(|e| UiflowError::io(&display, e))?;
    if let Some(permissions) = output_permissions(path) {
        file.as_file()
            .set_permissions(permissions)
            .map_err(|e| UiflowError::io(&display, e))?;
    }
    file.persist(path)
        .map_err(|e| UiflowError::io(&display, e.error))?;
    Ok(())
}

/// Permissions of the file being replaced, or the default for a new output file.
fn output_permissions(path: &Path) -> Option<std::fs::Permissions> {
    match std::fs::metadata(path) {
        Ok(existing) => Some(existing.permissions()),
        Err(_) => new_file_permissions(),
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<std::fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(std::fs::Permissions::from_mode(DEFAULT_OUTPUT_MODE))
}

// Temp files are only restricted on unix.
#[cfg(not(unix))]
fn new_file_permissions() -> Option<std::fs::Permissions> {
    None
}
