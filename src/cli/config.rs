use clap::Parser;
use serde::Deserialize;
use tracing::warn;

use crate::builder::label::Palette;
use crate::graph::render::{DEFAULT_RENDERER, OutputFormat};

pub const DEFAULT_CONFIG_FILE: &str = "uiflows.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "uiflows",
    version,
    about = "Render declarative UI screen flows as Graphviz graphs"
)]
pub struct Cli {
    /// Input YAML file describing the screens
    #[arg(short, long)]
    pub input: String,

    /// Output file
    #[arg(short, long)]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Dot)]
    pub format: OutputFormat,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to config file (default: uiflows.yaml in current dir)
    #[arg(long)]
    pub config: Option<String>,

    /// Graphviz program used for png/svg output
    #[arg(long)]
    pub renderer: Option<String>,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `uiflows.yaml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Default row colors, overridable per screen
    #[serde(default)]
    pub palette: Palette,

    #[serde(default)]
    pub renderer: RendererConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RendererConfig {
    #[serde(default = "default_program")]
    pub program: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
        }
    }
}

fn default_program() -> String {
    DEFAULT_RENDERER.to_string()
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_FILE);
    match std::fs::read_to_string(config_path) {
        Ok(content) => parse_config(&content).unwrap_or_else(|e| {
            warn!(path = config_path, error = %e, "ignoring malformed config file");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    serde_yaml::from_str(content)
}

/// Graphviz program to use: CLI > config > default.
pub fn resolve_renderer(cli_renderer: Option<&str>, config: &AppConfig) -> String {
    cli_renderer
        .map(str::to_string)
        .unwrap_or_else(|| config.renderer.program.clone())
}
