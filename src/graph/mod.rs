pub mod dot_model;
pub mod emitter;
pub mod render;
