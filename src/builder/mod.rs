pub mod edges;
pub mod flow_builder;
pub mod label;
