use serde::{Deserialize, Serialize};
use std::fmt;

//broad market the instrument belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Fx,
    Equity,
    Commodity,
    Index,
    Cryptocurrency,
}

impl AssetClass {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fx" | "currency" => Some(AssetClass::Fx),
            "equity" | "stock" => Some(AssetClass::Equity),
            "commodity" => Some(AssetClass::Commodity),
            "index" => Some(AssetClass::Index),
            "crypto" | "cryptocurrency" => Some(AssetClass::Cryptocurrency),
            _ => None,
        }
    }
}

//vendor the market data was obtained from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    FirstRate,
    TradingView,
    Databento,
}

impl DataSource {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "firstrate" => Some(DataSource::FirstRate),
            "tradingview" => Some(DataSource::TradingView),
            "databento" => Some(DataSource::Databento),
            _ => None,
        }
    }

    //lower-case name, also used as catalog directory
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::FirstRate => "firstrate",
            DataSource::TradingView => "tradingview",
            DataSource::Databento => "databento",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
