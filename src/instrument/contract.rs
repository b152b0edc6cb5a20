use crate::data::{PriceTable, Timeframe};
use crate::reference::{AssetClass, ContractReference, DataSource, ReferenceData};
use crate::symbol::{MonthCode, Symbol};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::borrow::Borrow;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{symbol}: {timeframe} series is required but missing or empty")]
pub struct MissingTimeframeError {
    pub symbol: Symbol,
    pub timeframe: Timeframe,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContractError {
    #[error(transparent)]
    MissingTimeframe(#[from] MissingTimeframeError),
    #[error("{0} is not an individual contract")]
    NotIndividual(Symbol),
    #[error("{symbol}: activation {activation} is after expiration {expiration}")]
    InvertedLifetime {
        symbol: Symbol,
        activation: DateTime<Utc>,
        expiration: DateTime<Utc>,
    },
}

//an individual, expiring futures contract with its price history
#[derive(Debug, Clone, PartialEq)]
pub struct Contract {
    reference: ContractReference,

    //daily bars are mandatory, the roll rules run on them
    daily: PriceTable,

    //any other timeframes, in the order they were supplied
    intraday: IndexMap<Timeframe, PriceTable>,
}

impl Contract {
    //binds reference data to price tables
    //activation and expiration default to the first and last daily bar when not supplied
    pub fn create(
        reference: ReferenceData,
        mut tables: IndexMap<Timeframe, PriceTable>,
    ) -> Result<Self, ContractError> {
        if reference.symbol.is_continuous() {
            return Err(ContractError::NotIndividual(reference.symbol));
        }

        let daily = tables.shift_remove(&Timeframe::Daily).unwrap_or_default();
        let bounds = daily
            .first()
            .zip(daily.last())
            .map(|(first, last)| (first.timestamp, last.timestamp));

        let Some((first, last)) = bounds else {
            return Err(MissingTimeframeError {
                symbol: reference.symbol,
                timeframe: Timeframe::Daily,
            }
            .into());
        };
        let reference = reference.resolve(first, last);

        if reference.activation > reference.expiration {
            return Err(ContractError::InvertedLifetime {
                symbol: reference.symbol,
                activation: reference.activation,
                expiration: reference.expiration,
            });
        }

        Ok(Contract {
            reference,
            daily,
            intraday: tables,
        })
    }

    //contract from a daily table only
    pub fn with_daily(reference: ReferenceData, daily: PriceTable) -> Result<Self, ContractError> {
        let mut tables = IndexMap::new();
        tables.insert(Timeframe::Daily, daily);
        Contract::create(reference, tables)
    }

    pub fn reference(&self) -> &ContractReference {
        &self.reference
    }

    pub fn symbol(&self) -> &Symbol {
        &self.reference.symbol
    }

    pub fn product_code(&self) -> &str {
        self.reference.symbol.product_code()
    }

    pub fn month_code(&self) -> Option<MonthCode> {
        self.reference.symbol.month_code()
    }

    pub fn source(&self) -> DataSource {
        self.reference.source
    }

    pub fn asset_class(&self) -> AssetClass {
        self.reference.asset_class
    }

    pub fn activation(&self) -> DateTime<Utc> {
        self.reference.activation
    }

    pub fn expiration(&self) -> DateTime<Utc> {
        self.reference.expiration
    }

    pub fn daily(&self) -> &PriceTable {
        &self.daily
    }

    pub fn table(&self, timeframe: Timeframe) -> Option<&PriceTable> {
        match timeframe {
            Timeframe::Daily => Some(&self.daily),
            other => self.intraday.get(&other),
        }
    }

    //daily first, then the rest in insertion order
    pub fn timeframes(&self) -> Vec<Timeframe> {
        std::iter::once(Timeframe::Daily)
            .chain(self.intraday.keys().copied())
            .collect()
    }
}

//orders contracts by product code, then expiration
pub fn sort_contracts<C: Borrow<Contract>>(contracts: &mut [C]) {
    contracts.sort_by(|a, b| {
        let (a, b) = (a.borrow(), b.borrow());
        a.product_code()
            .cmp(b.product_code())
            .then(a.expiration().cmp(&b.expiration()))
    });
}
