use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid equivalence value: {0:?}")]
    InvalidEquivalence(String),
    #[error("duplicate CUI in element definitions: {0}")]
    DuplicateCui(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
