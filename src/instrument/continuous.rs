use crate::data::{Bar, PriceTable, Timeframe};
use crate::reference::{AssetClass, DataSource};
use crate::roll::RolloverRule;
use crate::symbol::Symbol;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::ops::Range;

//run of consecutive bars taken from one contract
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub contract: Symbol,
    pub bars: Range<usize>,
}

//synthetic series stitched from individual contracts, only built by the stitcher
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousContract {
    pub(crate) symbol: Symbol,
    pub(crate) rule: RolloverRule,
    pub(crate) source: DataSource,
    pub(crate) asset_class: AssetClass,
    pub(crate) activation: DateTime<Utc>,
    pub(crate) expiration: DateTime<Utc>,
    pub(crate) daily: PriceTable,
    pub(crate) intraday: IndexMap<Timeframe, PriceTable>,
    pub(crate) segments: IndexMap<Timeframe, Vec<Segment>>,
}

impl ContinuousContract {
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn product_code(&self) -> &str {
        self.symbol.product_code()
    }

    //product, series and rule (eg ES-1-calendar_expiry)
    pub fn code(&self) -> String {
        format!("{}-{}", self.symbol.dashed(), self.rule.as_str())
    }

    pub fn rule(&self) -> RolloverRule {
        self.rule
    }

    pub fn source(&self) -> DataSource {
        self.source
    }

    pub fn asset_class(&self) -> AssetClass {
        self.asset_class
    }

    //first bar of the series
    pub fn activation(&self) -> DateTime<Utc> {
        self.activation
    }

    //last bar of the series
    pub fn expiration(&self) -> DateTime<Utc> {
        self.expiration
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

    pub fn timeframes(&self) -> Vec<Timeframe> {
        std::iter::once(Timeframe::Daily)
            .chain(self.intraday.keys().copied())
            .collect()
    }

    //contract runs behind the daily series
    pub fn segments(&self) -> &[Segment] {
        self.segments
            .get(&Timeframe::Daily)
            .map_or(&[][..], Vec::as_slice)
    }

    //contract the i-th daily bar was taken from
    pub fn source_of(&self, index: usize) -> Option<&Symbol> {
        let segments = self.segments();
        let position = segments.partition_point(|s| s.bars.end <= index);
        segments
            .get(position)
            .filter(|s| s.bars.contains(&index))
            .map(|s| &s.contract)
    }

    //bars of one timeframe paired with the contract each came from
    pub fn bars_with_sources(
        &self,
        timeframe: Timeframe,
    ) -> impl Iterator<Item = (&Bar, &Symbol)> + '_ {
        let bars = self.table(timeframe).map_or(&[][..], PriceTable::bars);
        self.segments
            .get(&timeframe)
            .into_iter()
            .flatten()
            .flat_map(move |segment| {
                bars[segment.bars.clone()]
                    .iter()
                    .map(move |bar| (bar, &segment.contract))
            })
    }

    pub fn daily_with_sources(&self) -> impl Iterator<Item = (&Bar, &Symbol)> + '_ {
        self.bars_with_sources(Timeframe::Daily)
    }
}
