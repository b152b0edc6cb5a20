use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BarError {
    #[error("Invalid OHLC values: high ({high}) < low ({low})")]
    InvalidHighLow { high: f64, low: f64 },
    #[error("Invalid OHLC values: close ({close}) outside high-low range [{low}, {high}]")]
    InvalidClose { close: f64, high: f64, low: f64 },
    #[error("Invalid OHLC values: open ({open}) outside high-low range [{low}, {high}]")]
    InvalidOpen { open: f64, high: f64, low: f64 },
    #[error("Negative volume: {0}")]
    NegativeVolume(f64),
    #[error("Negative open interest: {0}")]
    NegativeOpenInterest(f64),
}

//represents a single ohlcv bar of one contract, optionally with open interest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub open_interest: Option<f64>,
}

impl Bar {
    //creates a new Bar with validation
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        open_interest: Option<f64>,
    ) -> Result<Self, BarError> {
        //validate high >= low
        if high < low {
            return Err(BarError::InvalidHighLow { high, low });
        }

        //validate close within [low, high]
        if close < low || close > high {
            return Err(BarError::InvalidClose { close, high, low });
        }

        //validate open within [low, high]
        if open < low || open > high {
            return Err(BarError::InvalidOpen { open, high, low });
        }

        //validate non-negative volume
        if volume < 0.0 {
            return Err(BarError::NegativeVolume(volume));
        }

        if let Some(oi) = open_interest {
            if oi < 0.0 {
                return Err(BarError::NegativeOpenInterest(oi));
            }
        }

        Ok(Bar::new_unchecked(
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            open_interest,
        ))
    }

    //creates a Bar without validation
    pub fn new_unchecked(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        open_interest: Option<f64>,
    ) -> Self {
        Bar {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            open_interest,
        }
    }

    //calendar date of the bar (utc)
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn accepts_consistent_bar() {
        let bar = Bar::new(ts(), 100.0, 101.0, 99.0, 100.5, 1200.0, Some(5000.0))
            .expect("valid bar");
        assert_eq!(bar.date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn rejects_inconsistent_ohlc() {
        let err = Bar::new(ts(), 100.0, 99.0, 101.0, 100.0, 1.0, None).unwrap_err();
        assert!(matches!(err, BarError::InvalidHighLow { .. }));

        let err = Bar::new(ts(), 100.0, 101.0, 99.0, 102.0, 1.0, None).unwrap_err();
        assert!(matches!(err, BarError::InvalidClose { .. }));

        let err = Bar::new(ts(), 98.0, 101.0, 99.0, 100.0, 1.0, None).unwrap_err();
        assert!(matches!(err, BarError::InvalidOpen { .. }));

        let err = Bar::new(ts(), 100.0, 101.0, 99.0, 100.0, -1.0, None).unwrap_err();
        assert_eq!(err, BarError::NegativeVolume(-1.0));

        let err = Bar::new(ts(), 100.0, 101.0, 99.0, 100.0, 1.0, Some(-5.0)).unwrap_err();
        assert_eq!(err, BarError::NegativeOpenInterest(-5.0));
    }
}
