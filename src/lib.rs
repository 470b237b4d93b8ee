use crate::{
    builder::{flow_builder::FlowBuilder, label::Palette},
    error::UiflowError,
    flow::parser::parse_flows,
    graph::{dot_model::DotGraph, emitter::emit},
};

pub mod builder;
pub mod cli;
pub mod error;
pub mod flow;
pub mod graph;

/// Parse a flow document and turn it into a DOT graph.
///
/// All screens are collected before any edge is resolved, so actions may refer to
/// screens declared later in the document.
pub fn convert(text: &str, palette: &Palette) -> Result<DotGraph, UiflowError> {
    let screens = parse_flows(text)?;
    let flow = FlowBuilder::new(palette.clone()).build(&screens);
    Ok(emit(&flow))
}
