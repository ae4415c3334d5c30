use aippt_protocol::DeckProblem;
use thiserror::Error;

/// Anything that can go wrong between sending the request and holding a
/// usable deck.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("service responded with HTTP {status}")]
    Status { status: u16, body: String },

    #[error("response body is not a deck: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("service returned an unusable deck: {0}")]
    InvalidDeck(DeckProblem),

    #[error("invalid value for header {0}")]
    InvalidHeader(&'static str),
}
