use thiserror::Error;

#[derive(Debug, Error)]
pub enum EffectsError {
    #[error("typewriter needs at least one phrase")]
    NoPhrases,

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no modal entry named `{0}`")]
    UnknownEntry(String),
}

/// Why a contact-form POST failed
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("could not reach {url}: {reason}")]
    Transport { url: String, reason: String },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
}
