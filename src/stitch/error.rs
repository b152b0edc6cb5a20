use crate::data::Timeframe;
use crate::roll::RollError;
use crate::symbol::Symbol;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{timeframe} continuous index is not strictly increasing: {previous} followed by {next}")]
pub struct ContinuityError {
    pub timeframe: Timeframe,
    pub previous: DateTime<Utc>,
    pub next: DateTime<Utc>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StitchError {
    #[error("no contracts to stitch")]
    NoContracts,

    #[error("cannot stitch {found} into a {expected} series")]
    MixedProducts { expected: String, found: Symbol },

    #[error("{rolls} roll events for {contracts} contracts")]
    RollCountMismatch { contracts: usize, rolls: usize },

    #[error("{product}: stitched {timeframe} series is empty")]
    EmptySeries { product: String, timeframe: Timeframe },

    #[error(transparent)]
    Roll(#[from] RollError),

    #[error(transparent)]
    Continuity(#[from] ContinuityError),
}
