use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

/// Error types produced by the graph and its supporting containers.
#[derive(Debug, Error)]
pub enum GraphError {
    /// An argument was rejected before any state was touched, such as a
    /// negative or non-finite edge weight.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Growing a table or heap (or creating one) would pass its configured limit.
    #[error("Capacity {requested} exceeds allowed maximum of {max}")]
    CapacityExceeded {
        /// Capacity the operation needed.
        requested: usize,
        /// Configured hard limit.
        max: usize,
    },

    #[error("Vertex not found: {0}")]
    VertexNotFound(String),

    /// The operation is part of the graph contract but has no implementation.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
