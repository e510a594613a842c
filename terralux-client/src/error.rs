use terralux_api::CodecError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Frame codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Transport session {0} is gone")]
    TransportGone(u64),

    #[error("Client is not running")]
    Stopped,
}
