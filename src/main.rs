use std::process::ExitCode;

use clap::Parser;
use uiflows::cli::commands::cmd_convert;
use uiflows::cli::config::{Cli, load_config, resolve_renderer};
use uiflows::cli::logging::init_logging;
use uiflows::graph::render::Renderer;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref());

    // Resolve renderer: CLI > config > default
    let renderer = Renderer::new(resolve_renderer(cli.renderer.as_deref(), &config));

    match cmd_convert(&cli.input, &cli.output, cli.format, &config.palette, &renderer) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("uiflows: {e}");
            ExitCode::FAILURE
        }
    }
}
