//! GPU buffer management

pub mod lights_buffer;

pub use lights_buffer::{LightsBuffer, LightsUniform};
