use std::{collections::TryReserveError, io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PromoError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },
    #[error("word list {} unavailable: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no usable words found in {}", .path.display())]
    EmptyPool { path: PathBuf },
    #[error("insufficient words in pool ({size}, need at least 3)")]
    InsufficientPool { size: usize },
    #[error("requested count ({requested}) exceeds maximum possible combinations ({capacity})")]
    RequestExceedsCapacity { requested: usize, capacity: u128 },
    #[error("cannot hold {requested} codes in memory: {source}")]
    OutOfMemory {
        requested: usize,
        #[source]
        source: TryReserveError,
    },
    #[error("display failed: {0}")]
    DisplayFailure(#[from] io::Error),
    #[error("sampling stalled after {attempts} draws ({produced}/{requested} codes)")]
    SamplingStalled { attempts: u64, produced: usize, requested: usize },
}

impl PromoError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument { reason: reason.into() }
    }
}

pub type PromoResult<T> = Result<T, PromoError>;
