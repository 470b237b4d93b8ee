pub mod flow_model;
pub mod identity;
pub mod parser;
