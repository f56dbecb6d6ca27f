use thiserror::Error;

/// Errors that abort a whole folding request
///
/// A rule whose preconditions fail is not an error; it simply does not
/// match. Only conditions that make every answer unreliable end up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FoldError {
    /// Symbol resolution is temporarily unavailable. Safe to retry later.
    #[error("symbol index is not ready")]
    IndexNotReady,

    #[error("internal folding error: {0}")]
    Internal(String),
}

pub type FoldResult<T> = Result<T, FoldError>;
