//! WebGPU rendering module
//!
//! Scenes are built on the CPU as flat-colored triangles in play-area
//! coordinates and mapped to the canvas by the pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, play_to_ndc};
pub use scene::build_scene;
pub use vertex::Vertex;
