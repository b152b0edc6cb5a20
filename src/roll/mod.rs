mod calendar;
pub mod engine;
pub mod error;
mod open_interest;
pub mod rule;

pub use engine::{roll_schedule, switch_timestamp, RollEvent};
pub use error::RollError;
pub use rule::{RollParameters, RolloverRule};
