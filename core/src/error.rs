use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Channel send error")]
    ChannelSend,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard write failed: {0}")]
    Write(String),
}
