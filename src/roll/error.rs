use crate::symbol::Symbol;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RollError {
    #[error("{front} -> {back}: {missing} carries no open interest")]
    MissingOpenInterest {
        front: Symbol,
        back: Symbol,
        missing: Symbol,
    },

    #[error("{front} -> {back}: daily indexes do not overlap")]
    NoOverlap { front: Symbol, back: Symbol },

    #[error(
        "{front} -> {back}: {found} open interest crossovers in the last {window} shared bars, {required} required"
    )]
    InsufficientCrossovers {
        front: Symbol,
        back: Symbol,
        found: usize,
        required: usize,
        window: usize,
    },

    #[error("{front} -> {back}: no {back} bar after expiration {expiration}")]
    NoBackDataAfterExpiry {
        front: Symbol,
        back: Symbol,
        expiration: DateTime<Utc>,
    },

    #[error("{front} -> {back}: switch at {switch} leaves no {back} bar before its expiration {expiration}")]
    NoBackDataAfterSwitch {
        front: Symbol,
        back: Symbol,
        switch: DateTime<Utc>,
        expiration: DateTime<Utc>,
    },

    #[error(
        "{front} -> {back}: next bar {next} is {gap_days} days after expiration {expiration} (max {max_gap_days})"
    )]
    GapTooLarge {
        front: Symbol,
        back: Symbol,
        expiration: DateTime<Utc>,
        next: DateTime<Utc>,
        gap_days: i64,
        max_gap_days: u32,
    },

    #[error("{front} -> {back}: roll at {next} does not follow previous boundary {previous}")]
    NonMonotonic {
        front: Symbol,
        back: Symbol,
        previous: DateTime<Utc>,
        next: DateTime<Utc>,
    },

    #[error("invalid roll parameter: {0}")]
    InvalidParameter(String),
}
