//! Tile parallel Monte-Carlo path tracer.
//!
//! Build a [scene::SceneDescription], flatten it with `build()`, then hand it
//! to an [executor::Executor] together with a [frame_buffer::FrameBuffer].

pub mod camera;
pub mod color;
pub mod error;
pub mod executor;
pub mod frame_buffer;
pub mod integrators;
pub mod material;
pub mod math;
pub mod progress;
pub mod ray;
pub mod sampler;
pub mod scene;
pub mod shape;
pub mod soa;
pub mod tile;

pub use rand_xoshiro::Xoshiro256StarStar as Rng;

pub use error::RenderError;
pub use executor::{Executor, RenderOptions};
pub use frame_buffer::FrameBuffer;
pub use progress::{ProgressReport, RenderCommand, RenderStatus};
