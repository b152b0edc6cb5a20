use crate::data::bar::Bar;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("duplicate bar at {0}")]
    DuplicateTimestamp(DateTime<Utc>),
}

//ohlcv bars of one timeframe, ordered by timestamp with no duplicates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    bars: Vec<Bar>,
}

impl PriceTable {
    //sorts the bars and rejects duplicate timestamps
    pub fn new(mut bars: Vec<Bar>) -> Result<Self, TableError> {
        bars.sort_by_key(|bar| bar.timestamp);

        if let Some(pair) = bars.windows(2).find(|w| w[0].timestamp == w[1].timestamp) {
            return Err(TableError::DuplicateTimestamp(pair[1].timestamp));
        }

        Ok(PriceTable { bars })
    }

    //bars already known to be in strictly increasing order
    pub(crate) fn from_ordered(bars: Vec<Bar>) -> Self {
        debug_assert!(find_disorder(&bars).is_none());
        PriceTable { bars }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.bars.iter().map(|bar| bar.timestamp)
    }

    //true when at least one bar carries open interest
    pub fn has_open_interest(&self) -> bool {
        self.bars.iter().any(|bar| bar.open_interest.is_some())
    }

    //bar at exactly this timestamp
    pub fn get(&self, timestamp: DateTime<Utc>) -> Option<&Bar> {
        self.bars
            .binary_search_by_key(&timestamp, |bar| bar.timestamp)
            .ok()
            .map(|index| &self.bars[index])
    }

    //last bar at or before the timestamp
    pub fn at_or_before(&self, timestamp: DateTime<Utc>) -> Option<&Bar> {
        let end = self.bars.partition_point(|bar| bar.timestamp <= timestamp);
        end.checked_sub(1).map(|index| &self.bars[index])
    }

    //first bar on a calendar date strictly after `date`
    pub fn first_after_date(&self, date: NaiveDate) -> Option<&Bar> {
        let start = self.bars.partition_point(|bar| bar.date() <= date);
        self.bars.get(start)
    }

    //bars in the half-open range [start, end); None leaves that side unbounded
    pub fn range(&self, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> &[Bar] {
        let lo = start.map_or(0, |s| self.bars.partition_point(|bar| bar.timestamp < s));
        let hi = end.map_or(self.bars.len(), |e| {
            self.bars.partition_point(|bar| bar.timestamp < e)
        });
        if lo >= hi {
            &[]
        } else {
            &self.bars[lo..hi]
        }
    }

    //pairs of bars sharing a timestamp, in timestamp order
    pub fn inner_join<'a>(&'a self, other: &'a PriceTable) -> Vec<(&'a Bar, &'a Bar)> {
        let mut joined = Vec::new();
        let (mut i, mut j) = (0, 0);

        while i < self.bars.len() && j < other.bars.len() {
            let (left, right) = (&self.bars[i], &other.bars[j]);
            match left.timestamp.cmp(&right.timestamp) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    joined.push((left, right));
                    i += 1;
                    j += 1;
                }
            }
        }

        joined
    }
}

//first adjacent pair that is not strictly increasing
pub fn find_disorder(bars: &[Bar]) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    bars.windows(2)
        .find(|w| w[0].timestamp >= w[1].timestamp)
        .map(|w| (w[0].timestamp, w[1].timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, d, 0, 0, 0).unwrap()
    }

    fn bar(d: u32, oi: Option<f64>) -> Bar {
        Bar::new_unchecked(ts(d), 1.0, 1.0, 1.0, d as f64, 10.0, oi)
    }

    #[test]
    fn new_sorts_bars() {
        let table = PriceTable::new(vec![bar(3, None), bar(1, None), bar(2, None)]).unwrap();
        let days: Vec<_> = table.timestamps().collect();
        assert_eq!(days, vec![ts(1), ts(2), ts(3)]);
    }

    #[test]
    fn new_rejects_duplicates() {
        let err = PriceTable::new(vec![bar(1, None), bar(2, None), bar(1, None)]).unwrap_err();
        assert_eq!(err, TableError::DuplicateTimestamp(ts(1)));
    }

    #[test]
    fn range_is_half_open() {
        let table = PriceTable::new((1..=6).map(|d| bar(d, None)).collect()).unwrap();
        let slice = table.range(Some(ts(2)), Some(ts(5)));
        assert_eq!(slice.len(), 3);
        assert_eq!(slice[0].timestamp, ts(2));
        assert_eq!(slice[2].timestamp, ts(4));

        assert_eq!(table.range(None, Some(ts(3))).len(), 2);
        assert_eq!(table.range(Some(ts(5)), None).len(), 2);
        assert!(table.range(Some(ts(5)), Some(ts(2))).is_empty());
    }

    #[test]
    fn lookups_by_time() {
        let table = PriceTable::new(vec![bar(1, None), bar(3, None), bar(6, None)]).unwrap();
        assert_eq!(table.get(ts(3)).map(|b| b.close), Some(3.0));
        assert!(table.get(ts(2)).is_none());
        assert_eq!(table.at_or_before(ts(5)).map(|b| b.close), Some(3.0));
        assert!(table.at_or_before(Utc.with_ymd_and_hms(2024, 4, 30, 0, 0, 0).unwrap()).is_none());
        assert_eq!(
            table.first_after_date(ts(3).date_naive()).map(|b| b.close),
            Some(6.0)
        );
        assert!(table.first_after_date(ts(6).date_naive()).is_none());
    }

    #[test]
    fn inner_join_keeps_shared_timestamps() {
        let left = PriceTable::new((1..=5).map(|d| bar(d, Some(1.0))).collect()).unwrap();
        let right = PriceTable::new(vec![bar(2, None), bar(4, None), bar(9, None)]).unwrap();
        let joined: Vec<_> = left
            .inner_join(&right)
            .into_iter()
            .map(|(l, _)| l.timestamp)
            .collect();
        assert_eq!(joined, vec![ts(2), ts(4)]);
        assert!(left.has_open_interest());
        assert!(!right.has_open_interest());
    }

    #[test]
    fn disorder_reports_first_offending_pair() {
        let bars = vec![bar(1, None), bar(3, None), bar(3, None), bar(2, None)];
        assert_eq!(find_disorder(&bars), Some((ts(3), ts(3))));
        assert_eq!(find_disorder(&bars[..2]), None);
    }
}
