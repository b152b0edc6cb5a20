use crate::data::bar::Bar;
use crate::data::table::PriceTable;

//aggregates intraday bars into one bar per utc calendar date
//open first, high max, low min, close last, volume summed, open interest last reported
pub fn resample_daily(table: &PriceTable) -> PriceTable {
    let mut daily: Vec<Bar> = Vec::new();

    for bar in table.bars() {
        let date = bar.date();
        match daily.last_mut() {
            Some(current) if current.date() == date => {
                current.high = current.high.max(bar.high);
                current.low = current.low.min(bar.low);
                current.close = bar.close;
                current.volume += bar.volume;
                if bar.open_interest.is_some() {
                    current.open_interest = bar.open_interest;
                }
            }
            _ => {
                let midnight = date.and_time(chrono::NaiveTime::MIN).and_utc();
                daily.push(Bar::new_unchecked(
                    midnight,
                    bar.open,
                    bar.high,
                    bar.low,
                    bar.close,
                    bar.volume,
                    bar.open_interest,
                ));
            }
        }
    }

    PriceTable::from_ordered(daily)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[allow(clippy::too_many_arguments)]
    fn minute(d: u32, h: u32, m: u32, o: f64, h_: f64, l: f64, c: f64, v: f64) -> Bar {
        Bar::new_unchecked(
            Utc.with_ymd_and_hms(2024, 6, d, h, m, 0).unwrap(),
            o,
            h_,
            l,
            c,
            v,
            None,
        )
    }

    #[test]
    fn aggregates_each_day() {
        let table = PriceTable::new(vec![
            minute(3, 9, 30, 10.0, 11.0, 9.5, 10.5, 100.0),
            minute(3, 9, 31, 10.5, 12.0, 10.0, 11.5, 50.0),
            minute(3, 15, 59, 11.5, 11.6, 8.0, 9.0, 25.0),
            minute(4, 9, 30, 9.0, 9.2, 8.8, 9.1, 10.0),
        ])
        .unwrap();

        let daily = resample_daily(&table);
        assert_eq!(daily.len(), 2);

        let first = &daily.bars()[0];
        assert_eq!(first.timestamp, Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap());
        assert_eq!(first.open, 10.0);
        assert_eq!(first.high, 12.0);
        assert_eq!(first.low, 8.0);
        assert_eq!(first.close, 9.0);
        assert_eq!(first.volume, 175.0);

        let second = &daily.bars()[1];
        assert_eq!(second.open, 9.0);
        assert_eq!(second.volume, 10.0);
    }

    #[test]
    fn empty_table_stays_empty() {
        assert!(resample_daily(&PriceTable::default()).is_empty());
    }
}
