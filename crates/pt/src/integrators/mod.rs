pub mod batch;
pub mod pathtracing;

pub use batch::RayBatch;
pub use pathtracing::{PathState, PathTracer, TileWorkspace};
