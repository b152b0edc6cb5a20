use crate::instrument::Contract;
use crate::roll::error::RollError;
use crate::roll::rule::RollParameters;
use chrono::{DateTime, Utc};

//front keeps its expiration-day bar; the roll lands on back's first bar dated after it
//and must come strictly before back's own expiration
pub(crate) fn calendar_expiry_switch(
    front: &Contract,
    back: &Contract,
    params: &RollParameters,
) -> Result<DateTime<Utc>, RollError> {
    let expiration = front.expiration();

    let next = back
        .daily()
        .first_after_date(expiration.date_naive())
        .map(|bar| bar.timestamp)
        .ok_or_else(|| RollError::NoBackDataAfterExpiry {
            front: front.symbol().clone(),
            back: back.symbol().clone(),
            expiration,
        })?;

    let gap_days = (next.date_naive() - expiration.date_naive()).num_days();
    if gap_days > i64::from(params.max_gap_days) {
        return Err(RollError::GapTooLarge {
            front: front.symbol().clone(),
            back: back.symbol().clone(),
            expiration,
            next,
            gap_days,
            max_gap_days: params.max_gap_days,
        });
    }

    if next >= back.expiration() {
        return Err(RollError::NoBackDataAfterSwitch {
            front: front.symbol().clone(),
            back: back.symbol().clone(),
            switch: next,
            expiration: back.expiration(),
        });
    }

    Ok(next)
}
