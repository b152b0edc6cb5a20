pub mod continuous;
pub mod contract;

pub use continuous::{ContinuousContract, Segment};
pub use contract::{sort_contracts, Contract, ContractError, MissingTimeframeError};

use crate::data::{PriceTable, Timeframe};
use crate::symbol::Symbol;
use chrono::{DateTime, Utc};

//either kind of futures instrument behind one interface
#[derive(Debug, Clone, PartialEq)]
pub enum Instrument {
    Individual(Contract),
    Continuous(ContinuousContract),
}

impl Instrument {
    pub fn symbol(&self) -> &Symbol {
        match self {
            Instrument::Individual(c) => c.symbol(),
            Instrument::Continuous(c) => c.symbol(),
        }
    }

    pub fn product_code(&self) -> &str {
        self.symbol().product_code()
    }

    pub fn table(&self, timeframe: Timeframe) -> Option<&PriceTable> {
        match self {
            Instrument::Individual(c) => c.table(timeframe),
            Instrument::Continuous(c) => c.table(timeframe),
        }
    }

    pub fn timeframes(&self) -> Vec<Timeframe> {
        match self {
            Instrument::Individual(c) => c.timeframes(),
            Instrument::Continuous(c) => c.timeframes(),
        }
    }

    pub fn activation(&self) -> DateTime<Utc> {
        match self {
            Instrument::Individual(c) => c.activation(),
            Instrument::Continuous(c) => c.activation(),
        }
    }

    pub fn expiration(&self) -> DateTime<Utc> {
        match self {
            Instrument::Individual(c) => c.expiration(),
            Instrument::Continuous(c) => c.expiration(),
        }
    }

    //display name, continuous series include their rule
    pub fn name(&self) -> String {
        match self {
            Instrument::Individual(c) => c.symbol().to_string(),
            Instrument::Continuous(c) => c.code(),
        }
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self, Instrument::Continuous(_))
    }
}

impl From<Contract> for Instrument {
    fn from(contract: Contract) -> Self {
        Instrument::Individual(contract)
    }
}

impl From<ContinuousContract> for Instrument {
    fn from(contract: ContinuousContract) -> Self {
        Instrument::Continuous(contract)
    }
}
