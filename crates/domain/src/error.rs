use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("image has empty dimensions {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
    #[error("display budget must be positive, got {0}")]
    InvalidDisplayBudget(u32),
}
