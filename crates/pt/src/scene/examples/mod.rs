mod cornell;
mod spheres;
pub mod debug;

pub use cornell::CornellBoxScene;
pub use debug::DebugScene;
pub use spheres::SpheresScene;
