use serde::{Deserialize, Serialize};
use std::fmt;

//bar granularity a price table is sampled at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Timeframe {
    Minutes(u32),
    Daily,
}

impl Timeframe {
    //parse a timeframe label (eg d, 1day, daily, 1m, 5min)
    pub fn parse(s: &str) -> Option<Self> {
        let label = s.trim().to_lowercase();
        match label.as_str() {
            "d" | "1d" | "1day" | "daily" => return Some(Timeframe::Daily),
            "m" | "minute" => return Some(Timeframe::Minutes(1)),
            _ => {}
        }

        let digits: String = label.chars().take_while(|c| c.is_ascii_digit()).collect();
        let unit = &label[digits.len()..];
        let count: u32 = digits.parse().ok()?;
        if count == 0 {
            return None;
        }
        match unit {
            "m" | "min" | "minute" | "minutes" => Some(Timeframe::Minutes(count)),
            _ => None,
        }
    }

    //label used in firstrate file names (1day, 1min, 5min)
    pub fn label(&self) -> String {
        match self {
            Timeframe::Daily => "1day".to_string(),
            Timeframe::Minutes(n) => format!("{}min", n),
        }
    }

    //catalog directory name (1d, 1m, 5m)
    pub fn dir_name(&self) -> String {
        match self {
            Timeframe::Daily => "1d".to_string(),
            Timeframe::Minutes(n) => format!("{}m", n),
        }
    }

    pub fn is_daily(&self) -> bool {
        matches!(self, Timeframe::Daily)
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl TryFrom<String> for Timeframe {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Timeframe::parse(&value).ok_or_else(|| format!("unknown timeframe '{}'", value))
    }
}

impl From<Timeframe> for String {
    fn from(value: Timeframe) -> Self {
        value.label()
    }
}
