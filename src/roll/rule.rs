use crate::roll::error::RollError;
use serde::{Deserialize, Serialize};
use std::fmt;

//which contract is authoritative on a given date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RolloverRule {
    //hold the front contract through its expiration day
    CalendarExpiry,
    //switch once the back contract's open interest has overtaken the front's
    OpenInterestCrossover,
}

impl RolloverRule {
    //parse rule from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "expiry" | "calendar" | "calendar_expiry" => Some(RolloverRule::CalendarExpiry),
            "oi" | "open_interest" | "open_interest_crossover" => {
                Some(RolloverRule::OpenInterestCrossover)
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RolloverRule::CalendarExpiry => "calendar_expiry",
            RolloverRule::OpenInterestCrossover => "open_interest_crossover",
        }
    }
}

impl fmt::Display for RolloverRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//tunables for the roll rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollParameters {
    //trailing shared daily rows searched for open interest crossovers
    pub days_to_expiration: usize,

    //which crossover triggers the roll; 2 ignores single-day fakeouts
    pub occurrence: usize,

    //largest tolerated calendar gap between an expiration and the next contract's first bar
    pub max_gap_days: u32,
}

impl Default for RollParameters {
    fn default() -> Self {
        RollParameters {
            days_to_expiration: 20,
            occurrence: 2,
            max_gap_days: 10,
        }
    }
}

impl RollParameters {
    pub fn validate(&self) -> Result<(), RollError> {
        if self.occurrence == 0 {
            return Err(RollError::InvalidParameter(
                "occurrence must be at least 1".to_string(),
            ));
        }
        if self.days_to_expiration == 0 {
            return Err(RollError::InvalidParameter(
                "days_to_expiration must be at least 1".to_string(),
            ));
        }
        //the window could never hold enough crossovers
        if self.occurrence > self.days_to_expiration {
            return Err(RollError::InvalidParameter(format!(
                "occurrence ({}) exceeds days_to_expiration ({})",
                self.occurrence, self.days_to_expiration
            )));
        }
        Ok(())
    }
}
