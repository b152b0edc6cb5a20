use crate::data::{find_disorder, Bar, PriceTable, Timeframe};
use crate::instrument::{ContinuousContract, Contract, Segment};
use crate::reference::{AssetClass, DataSource};
use crate::roll::{RollEvent, RolloverRule};
use crate::stitch::error::{ContinuityError, StitchError};
use crate::symbol::Symbol;
use indexmap::IndexMap;
use std::borrow::Borrow;

//bars cut from each contract and joined, not yet checked for order
#[derive(Debug, Clone)]
pub struct Concatenated {
    product: String,
    rule: RolloverRule,
    source: DataSource,
    asset_class: AssetClass,
    tables: IndexMap<Timeframe, Vec<Bar>>,
    segments: IndexMap<Timeframe, Vec<Segment>>,
}

//slices every timeframe shared by all contracts at the roll boundaries
//contract i contributes [roll i-1, roll i), clipped to its own activation..=expiration dates
pub fn concatenate<C: Borrow<Contract>>(
    contracts: &[C],
    rolls: &[RollEvent],
    rule: RolloverRule,
) -> Result<Concatenated, StitchError> {
    let Some(first) = contracts.first().map(|c| -> &Contract { c.borrow() }) else {
        return Err(StitchError::NoContracts);
    };
    if rolls.len() + 1 != contracts.len() {
        return Err(StitchError::RollCountMismatch {
            contracts: contracts.len(),
            rolls: rolls.len(),
        });
    }

    let timeframes: Vec<Timeframe> = first
        .timeframes()
        .into_iter()
        .filter(|tf| contracts.iter().all(|c| c.borrow().table(*tf).is_some()))
        .collect();

    let mut tables = IndexMap::new();
    let mut segments = IndexMap::new();

    for timeframe in timeframes {
        let mut bars: Vec<Bar> = Vec::new();
        let mut runs = Vec::new();

        for (i, contract) in contracts.iter().enumerate() {
            let contract = contract.borrow();
            let Some(table) = contract.table(timeframe) else {
                continue;
            };

            let entry = i.checked_sub(1).map(|previous| rolls[previous].timestamp);
            let exit = rolls.get(i).map(|roll| roll.timestamp);
            let (activation, expiration) = (
                contract.activation().date_naive(),
                contract.expiration().date_naive(),
            );

            let start = bars.len();
            bars.extend(
                table
                    .range(entry, exit)
                    .iter()
                    .filter(|bar| (activation..=expiration).contains(&bar.date()))
                    .cloned(),
            );

            if bars.len() > start {
                runs.push(Segment {
                    contract: contract.symbol().clone(),
                    bars: start..bars.len(),
                });
            }
        }

        tables.insert(timeframe, bars);
        segments.insert(timeframe, runs);
    }

    Ok(Concatenated {
        product: first.product_code().to_string(),
        rule,
        source: first.source(),
        asset_class: first.asset_class(),
        tables,
        segments,
    })
}

impl Concatenated {
    //every stitched index must be strictly increasing, the daily one non-empty
    pub fn validate(self) -> Result<ContinuousContract, StitchError> {
        let mut daily = None;
        let mut intraday = IndexMap::new();

        for (timeframe, bars) in self.tables {
            if let Some((previous, next)) = find_disorder(&bars) {
                return Err(ContinuityError {
                    timeframe,
                    previous,
                    next,
                }
                .into());
            }

            let table = PriceTable::from_ordered(bars);
            if timeframe.is_daily() {
                daily = Some(table);
            } else {
                intraday.insert(timeframe, table);
            }
        }

        let daily = daily.unwrap_or_default();
        let bounds = daily
            .first()
            .zip(daily.last())
            .map(|(first, last)| (first.timestamp, last.timestamp));
        let Some((activation, expiration)) = bounds else {
            return Err(StitchError::EmptySeries {
                product: self.product,
                timeframe: Timeframe::Daily,
            });
        };

        Ok(ContinuousContract {
            symbol: Symbol::continuous(&self.product, 1),
            rule: self.rule,
            source: self.source,
            asset_class: self.asset_class,
            activation,
            expiration,
            daily,
            intraday,
            segments: self.segments,
        })
    }
}

//slice, concatenate and validate in one step
pub fn stitch<C: Borrow<Contract>>(
    contracts: &[C],
    rolls: &[RollEvent],
    rule: RolloverRule,
) -> Result<ContinuousContract, StitchError> {
    concatenate(contracts, rolls, rule)?.validate()
}
