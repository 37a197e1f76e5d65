//! Rendering module
//!
//! `scene` turns game state into neon triangles in screen pixels; `pipeline`
//! pushes them through WebGPU.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
