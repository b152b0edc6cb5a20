use crate::instrument::Contract;
use crate::roll::error::RollError;
use crate::roll::rule::RollParameters;
use chrono::{DateTime, Utc};
use log::debug;

//roll on the n-th day, within the last shared rows, where back's open interest exceeds front's
//only rows inside both lifetimes count, so the roll never lands after front's expiration
//a single crossing is treated as noise unless occurrence is 1
pub(crate) fn open_interest_switch(
    front: &Contract,
    back: &Contract,
    params: &RollParameters,
) -> Result<DateTime<Utc>, RollError> {
    for contract in [front, back] {
        if !contract.daily().has_open_interest() {
            return Err(RollError::MissingOpenInterest {
                front: front.symbol().clone(),
                back: back.symbol().clone(),
                missing: contract.symbol().clone(),
            });
        }
    }

    let lifetime = back.activation().date_naive()..=front.expiration().date_naive();
    let shared: Vec<_> = front
        .daily()
        .inner_join(back.daily())
        .into_iter()
        .filter(|(f, _)| lifetime.contains(&f.date()))
        .collect();
    if shared.is_empty() {
        return Err(RollError::NoOverlap {
            front: front.symbol().clone(),
            back: back.symbol().clone(),
        });
    }

    let window = &shared[shared.len().saturating_sub(params.days_to_expiration)..];

    //rows where either side lacks open interest never count
    let crossovers: Vec<DateTime<Utc>> = window
        .iter()
        .filter_map(|(f, b)| match (f.open_interest, b.open_interest) {
            (Some(front_oi), Some(back_oi)) if back_oi > front_oi => Some(f.timestamp),
            _ => None,
        })
        .collect();

    debug!(
        "{} -> {}: {} crossovers in {} shared rows",
        front.symbol(),
        back.symbol(),
        crossovers.len(),
        window.len()
    );

    params
        .occurrence
        .checked_sub(1)
        .and_then(|index| crossovers.get(index))
        .copied()
        .ok_or_else(|| RollError::InsufficientCrossovers {
            front: front.symbol().clone(),
            back: back.symbol().clone(),
            found: crossovers.len(),
            required: params.occurrence,
            window: window.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Bar, PriceTable};
    use crate::reference::ReferenceData;
    use crate::symbol::Symbol;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, d, 0, 0, 0).unwrap()
    }

    fn contract(code: &str, rows: &[(u32, Option<f64>)]) -> Contract {
        let bars = rows
            .iter()
            .map(|&(d, oi)| Bar::new_unchecked(day(d), 1.0, 1.0, 1.0, 1.0, 1.0, oi))
            .collect();
        Contract::with_daily(
            ReferenceData::from_symbol(Symbol::parse(code).unwrap()),
            PriceTable::new(bars).unwrap(),
        )
        .unwrap()
    }

    fn params(days_to_expiration: usize, occurrence: usize) -> RollParameters {
        RollParameters {
            days_to_expiration,
            occurrence,
            ..RollParameters::default()
        }
    }

    #[test]
    fn ignores_first_crossing() {
        let front = contract("ESM24", &[(3, Some(100.0)), (4, Some(90.0)), (5, Some(80.0)), (6, Some(70.0))]);
        let back = contract("ESU24", &[(3, Some(110.0)), (4, Some(85.0)), (5, Some(95.0)), (6, Some(99.0))]);

        assert_eq!(open_interest_switch(&front, &back, &params(20, 2)).unwrap(), day(5));
        assert_eq!(open_interest_switch(&front, &back, &params(20, 1)).unwrap(), day(3));
        assert_eq!(open_interest_switch(&front, &back, &params(20, 3)).unwrap(), day(6));
    }

    #[test]
    fn only_the_trailing_window_is_searched() {
        let front = contract("ESM24", &[(3, Some(100.0)), (4, Some(100.0)), (5, Some(100.0)), (6, Some(50.0))]);
        let back = contract("ESU24", &[(3, Some(200.0)), (4, Some(50.0)), (5, Some(200.0)), (6, Some(60.0))]);

        //crossings on 3, 5, 6; a window of 2 rows only sees 5 and 6
        assert_eq!(open_interest_switch(&front, &back, &params(2, 2)).unwrap(), day(6));
        assert_eq!(open_interest_switch(&front, &back, &params(1, 1)).unwrap(), day(6));
        let err = open_interest_switch(&front, &back, &params(2, 3)).unwrap_err();
        assert!(matches!(
            err,
            RollError::InsufficientCrossovers { found: 2, required: 3, window: 2, .. }
        ));
    }

    #[test]
    fn missing_values_never_cross() {
        let front = contract("ESM24", &[(3, Some(100.0)), (4, None), (5, Some(10.0))]);
        let back = contract("ESU24", &[(3, None), (4, Some(500.0)), (5, Some(20.0))]);

        let err = open_interest_switch(&front, &back, &params(20, 2)).unwrap_err();
        assert!(matches!(err, RollError::InsufficientCrossovers { found: 1, .. }));
    }

    #[test]
    fn requires_open_interest_on_both_sides() {
        let front = contract("ESM24", &[(3, Some(100.0)), (4, Some(90.0))]);
        let back = contract("ESU24", &[(3, None), (4, None)]);

        let err = open_interest_switch(&front, &back, &params(20, 2)).unwrap_err();
        match err {
            RollError::MissingOpenInterest { missing, .. } => {
                assert_eq!(missing.to_string(), "ESU2024")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn crossovers_after_front_expiration_are_ignored() {
        let rows = |oi: f64| (3..=14).map(move |d| (d, Some(oi))).collect::<Vec<_>>();
        let front = Contract::with_daily(
            ReferenceData::from_symbol(Symbol::parse("ESM24").unwrap()).with_expiration(day(7)),
            contract("ESM24", &rows(100.0)).daily().clone(),
        )
        .unwrap();
        let back = contract(
            "ESU24",
            &(3..=14)
                .map(|d| (d, Some(if d >= 10 { 500.0 } else { 50.0 })))
                .collect::<Vec<_>>(),
        );

        let err = open_interest_switch(&front, &back, &params(20, 2)).unwrap_err();
        assert!(matches!(
            err,
            RollError::InsufficientCrossovers { found: 0, window: 5, .. }
        ));

        let early = contract(
            "ESU24",
            &(3..=14)
                .map(|d| (d, Some(if d >= 5 { 500.0 } else { 50.0 })))
                .collect::<Vec<_>>(),
        );
        let switch = open_interest_switch(&front, &early, &params(20, 2)).unwrap();
        assert_eq!(switch, day(6));
        assert!(switch <= front.expiration());
    }

    #[test]
    fn rows_before_back_activation_are_ignored() {
        let front = contract("ESM24", &[(3, Some(10.0)), (4, Some(10.0)), (5, Some(10.0)), (6, Some(10.0))]);
        let back = Contract::with_daily(
            ReferenceData::from_symbol(Symbol::parse("ESU24").unwrap()).with_activation(day(5)),
            contract("ESU24", &[(3, Some(90.0)), (4, Some(90.0)), (5, Some(90.0)), (6, Some(90.0))])
                .daily()
                .clone(),
        )
        .unwrap();

        assert_eq!(open_interest_switch(&front, &back, &params(20, 2)).unwrap(), day(6));
    }

    #[test]
    fn disjoint_contracts_do_not_overlap() {
        let front = contract("ESM24", &[(3, Some(100.0)), (4, Some(90.0))]);
        let back = contract("ESU24", &[(10, Some(100.0)), (11, Some(190.0))]);

        let err = open_interest_switch(&front, &back, &params(20, 2)).unwrap_err();
        assert!(matches!(err, RollError::NoOverlap { .. }));
    }
}
