use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid render configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid scene: {0}")]
    InvalidScene(String),
    #[error("invalid tiling: {0}")]
    InvalidTiling(String),
    #[error("could not build the worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("a render worker panicked")]
    WorkerPanicked,
}

pub type Result<T, E = RenderError> = std::result::Result<T, E>;
