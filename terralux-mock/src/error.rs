#[derive(Debug, thiserror::Error)]
pub enum MockError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("Server stopped: {0}")]
    Serve(#[from] std::io::Error),
}
