use crate::instrument::Contract;
use crate::roll::calendar::calendar_expiry_switch;
use crate::roll::error::RollError;
use crate::roll::open_interest::open_interest_switch;
use crate::roll::rule::{RollParameters, RolloverRule};
use crate::symbol::Symbol;
use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;
use std::borrow::Borrow;

//authority passes from one contract to the next at `timestamp`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollEvent {
    pub timestamp: DateTime<Utc>,
    pub from: Symbol,
    pub to: Symbol,
}

//switch timestamp for one adjacent pair
pub fn switch_timestamp(
    front: &Contract,
    back: &Contract,
    rule: RolloverRule,
    params: &RollParameters,
) -> Result<DateTime<Utc>, RollError> {
    params.validate()?;

    match rule {
        RolloverRule::CalendarExpiry => calendar_expiry_switch(front, back, params),
        RolloverRule::OpenInterestCrossover => open_interest_switch(front, back, params),
    }
}

//one roll per adjacent pair of contracts already sorted by (product, expiration)
//the resulting timestamps must strictly increase, starting after the first activation
pub fn roll_schedule<C: Borrow<Contract>>(
    contracts: &[C],
    rule: RolloverRule,
    params: &RollParameters,
) -> Result<Vec<RollEvent>, RollError> {
    params.validate()?;

    let Some(first) = contracts.first() else {
        return Ok(Vec::new());
    };

    let mut previous = first.borrow().activation();
    let mut events = Vec::with_capacity(contracts.len().saturating_sub(1));

    for pair in contracts.windows(2) {
        let (front, back) = (pair[0].borrow(), pair[1].borrow());
        let timestamp = switch_timestamp(front, back, rule, params)?;

        if timestamp <= previous {
            return Err(RollError::NonMonotonic {
                front: front.symbol().clone(),
                back: back.symbol().clone(),
                previous,
                next: timestamp,
            });
        }

        debug!(
            "{} roll {} -> {} at {}",
            rule,
            front.symbol(),
            back.symbol(),
            timestamp
        );

        events.push(RollEvent {
            timestamp,
            from: front.symbol().clone(),
            to: back.symbol().clone(),
        });
        previous = timestamp;
    }

    Ok(events)
}
