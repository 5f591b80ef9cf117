//! Renderable surface: primitives, materials, and the scene graph they live in.
#![forbid(unsafe_code)]

pub mod environment;
pub mod graph;
pub mod material;
pub mod primitive;

pub use environment::{DirectionalLight, Environment, Fog};
pub use graph::{SceneGraph, Surface};
pub use material::{Material, MaterialKind};
pub use primitive::{Handle, Primitive, Shape};
