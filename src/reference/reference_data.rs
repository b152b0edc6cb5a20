use crate::reference::enums::{AssetClass, DataSource};
use crate::symbol::Symbol;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//metadata describing a contract as supplied by the loading layer
//activation and expiration are optional until the contract is paired with prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub symbol: Symbol,
    pub source: DataSource,
    pub asset_class: AssetClass,
    pub activation: Option<DateTime<Utc>>,
    pub expiration: Option<DateTime<Utc>>,
}

impl ReferenceData {
    pub fn new(symbol: Symbol, source: DataSource, asset_class: AssetClass) -> Self {
        ReferenceData {
            symbol,
            source,
            asset_class,
            activation: None,
            expiration: None,
        }
    }

    //firstrate fx defaults, what the catalog assumes when nothing else is known
    pub fn from_symbol(symbol: Symbol) -> Self {
        ReferenceData::new(symbol, DataSource::FirstRate, AssetClass::Fx)
    }

    pub fn with_activation(mut self, activation: DateTime<Utc>) -> Self {
        self.activation = Some(activation);
        self
    }

    pub fn with_expiration(mut self, expiration: DateTime<Utc>) -> Self {
        self.expiration = Some(expiration);
        self
    }

    //fills missing dates from the bounds of the daily index
    pub(crate) fn resolve(self, first: DateTime<Utc>, last: DateTime<Utc>) -> ContractReference {
        ContractReference {
            activation: self.activation.unwrap_or(first),
            expiration: self.expiration.unwrap_or(last),
            symbol: self.symbol,
            source: self.source,
            asset_class: self.asset_class,
        }
    }
}

//reference data bound to a contract, every date known
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractReference {
    pub symbol: Symbol,
    pub source: DataSource,
    pub asset_class: AssetClass,
    pub activation: DateTime<Utc>,
    pub expiration: DateTime<Utc>,
}
