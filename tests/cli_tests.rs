use clap::Parser;
use uiflows::builder::label::{Palette, TOP_BG_COLOR};
use uiflows::cli::commands::{cmd_convert, write_atomically};
use uiflows::cli::config::{AppConfig, Cli, load_config, parse_config, resolve_renderer};
use uiflows::cli::logging::level_for;
use uiflows::error::UiflowError;
use uiflows::graph::render::{OutputFormat, Renderer};

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_minimal() {
    let cli = Cli::parse_from(["uiflows", "-i", "flow.yml", "-o", "flow.dot"]);
    assert_eq!(cli.input, "flow.yml");
    assert_eq!(cli.output, "flow.dot");
    assert_eq!(cli.format, OutputFormat::Dot);
    assert_eq!(cli.verbose, 0);
    assert!(cli.config.is_none());
    assert!(cli.renderer.is_none());
}

#[test]
fn cli_parse_all_args() {
    let cli = Cli::parse_from([
        "uiflows",
        "--input",
        "flow.yml",
        "--output",
        "flow.svg",
        "--format",
        "svg",
        "-vv",
        "--config",
        "custom.yaml",
        "--renderer",
        "/opt/graphviz/bin/dot",
    ]);
    assert_eq!(cli.format, OutputFormat::Svg);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.config.as_deref(), Some("custom.yaml"));
    assert_eq!(cli.renderer.as_deref(), Some("/opt/graphviz/bin/dot"));
}

#[test]
fn cli_requires_input_and_output() {
    assert!(Cli::try_parse_from(["uiflows", "-o", "flow.dot"]).is_err());
    assert!(Cli::try_parse_from(["uiflows", "-i", "flow.yml"]).is_err());
}

#[test]
fn cli_rejects_unknown_format() {
    let result = Cli::try_parse_from(["uiflows", "-i", "a", "-o", "b", "-f", "pdf"]);
    assert!(result.is_err());
}

#[test]
fn verbosity_levels() {
    assert_eq!(level_for(0), "uiflows=warn");
    assert_eq!(level_for(1), "uiflows=info");
    assert_eq!(level_for(2), "uiflows=debug");
    assert_eq!(level_for(9), "uiflows=trace");
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn config_defaults_when_file_missing() {
    let config = load_config(Some("/nonexistent/uiflows.yaml"));
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.palette.top_bg_color, TOP_BG_COLOR);
    assert_eq!(config.renderer.program, "dot");
}

#[test]
fn config_partial_palette_keeps_other_defaults() {
    let config = parse_config("palette:\n  see_color: black\n").unwrap();
    assert_eq!(config.palette.see_color, "black");
    assert_eq!(config.palette.top_bg_color, TOP_BG_COLOR);
    assert_eq!(config.renderer.program, "dot");
}

#[test]
fn config_malformed_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("uiflows.yaml");
    std::fs::write(&path, "palette: 42\nrenderer: [unclosed").unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config, AppConfig::default());
}

#[test]
fn renderer_precedence_cli_over_config() {
    let config = parse_config("renderer:\n  program: /usr/local/bin/dot\n").unwrap();
    assert_eq!(resolve_renderer(None, &config), "/usr/local/bin/dot");
    assert_eq!(resolve_renderer(Some("neato"), &config), "neato");
}

// ============================================================================
// convert command
// ============================================================================

#[test]
fn convert_writes_dot_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("flow.yml");
    let output = dir.path().join("flow.dot");
    std::fs::write(
        &input,
        "- name: Top\n  action:\n    - Login: Login\n- name: Login\n  action:\n    - Help\n- name: End\n",
    )
    .unwrap();

    let summary = cmd_convert(
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        OutputFormat::Dot,
        &Palette::default(),
        &Renderer::default(),
    )
    .unwrap();

    assert_eq!(summary.nodes, 3);
    assert_eq!(summary.edges, 2);

    let text = std::fs::read_to_string(&output).unwrap();
    assert_eq!(summary.bytes, text.len());
    assert!(text.starts_with("digraph"));
    assert_eq!(text.matches(" -> ").count(), 2);
}

#[test]
fn convert_failure_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("flow.yml");
    let output = dir.path().join("flow.dot");
    std::fs::write(&input, "- name: Top\n  action:\n    - event: buy\n      color: red\n").unwrap();

    let err = cmd_convert(
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        OutputFormat::Dot,
        &Palette::default(),
        &Renderer::default(),
    )
    .unwrap_err();

    assert!(matches!(err, UiflowError::InvalidAction { .. }), "{err}");
    assert!(!output.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn convert_keeps_previous_output_when_rendering_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("flow.yml");
    let output = dir.path().join("flow.png");
    std::fs::write(&input, "- name: Top\n").unwrap();
    std::fs::write(&output, b"previous").unwrap();

    let err = cmd_convert(
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        OutputFormat::Png,
        &Palette::default(),
        &Renderer::new("uiflows-no-such-graphviz-program"),
    )
    .unwrap_err();

    assert!(matches!(err, UiflowError::RendererSpawn { .. }), "{err}");
    assert_eq!(std::fs::read(&output).unwrap(), b"previous");
}

#[test]
fn convert_missing_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("flow.dot");

    let err = cmd_convert(
        dir.path().join("missing.yml").to_str().unwrap(),
        output.to_str().unwrap(),
        OutputFormat::Dot,
        &Palette::default(),
        &Renderer::default(),
    )
    .unwrap_err();

    assert!(matches!(err, UiflowError::Io { .. }), "{err}");
    assert!(err.to_string().contains("missing.yml"));
    assert!(!output.exists());
}

#[test]
fn write_atomically_replaces_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.dot");
    std::fs::write(&path, "old").unwrap();

    write_atomically(&path, b"new").unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[cfg(unix)]
#[test]
fn write_atomically_new_file_is_not_owner_only() {
    use std::os::unix::fs::PermissionsExt;
    use uiflows::cli::commands::DEFAULT_OUTPUT_MODE;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.dot");

    write_atomically(&path, b"x").unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, DEFAULT_OUTPUT_MODE);
}

#[cfg(unix)]
#[test]
fn write_atomically_keeps_existing_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.svg");
    std::fs::write(&path, "old").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();

    write_atomically(&path, b"new").unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o640);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
}
