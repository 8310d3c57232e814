use thiserror::Error;

/// Faults raised by the card core.
///
/// Every variant is an authoring error: the card has no user-visible error
/// surface, so callers log these and stop rather than try to recover.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("missing card config: {0}")]
    MissingConfig(String),
    #[error("malformed card config: {0}")]
    MalformedConfig(#[from] serde_json::Error),
    #[error("card config defines no scenes")]
    NoScenes,
    #[error("duplicate {kind} id `{id}`")]
    DuplicateId { kind: &'static str, id: String },
    #[error("unknown scene `{0}`")]
    UnknownScene(String),
    #[error("scene `{scene}` has no action #{index}")]
    UnknownAction { scene: String, index: usize },
}

pub type Result<T, E = CardError> = std::result::Result<T, E>;
