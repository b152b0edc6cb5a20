use crate::data::aggregation::resample_daily;
use crate::data::loader::{load_csv, load_csv_validated};
use crate::data::table::PriceTable;
use crate::data::timeframe::Timeframe;
use crate::instrument::{sort_contracts, Contract};
use crate::reference::{DataSource, ReferenceData};
use crate::symbol::{MonthCode, Symbol};
use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use log::{info, warn};
use regex::Regex;
use std::path::{Path, PathBuf};

//on-disk layout: {root}/{source}/{timeframe dir}/{stem}_{label}.txt
#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
    validate: bool,
}

impl Catalog {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Catalog {
            root: root.into(),
            validate: false,
        }
    }

    //every loaded bar must pass ohlc validation
    pub fn validated(mut self) -> Self {
        self.validate = true;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    //continuation symbols have no per-contract file
    pub fn path_for(
        &self,
        symbol: &Symbol,
        source: DataSource,
        timeframe: Timeframe,
    ) -> Option<PathBuf> {
        let stem = symbol.firstrate_stem()?;
        Some(
            self.root
                .join(source.as_str())
                .join(timeframe.dir_name())
                .join(format!("{}_{}.txt", stem, timeframe.label())),
        )
    }

    fn load_table(&self, path: &Path) -> Result<PriceTable> {
        if self.validate {
            load_csv_validated(path)
        } else {
            load_csv(path)
        }
    }

    //missing intraday files are skipped; without a daily file the finest intraday table is resampled
    pub fn load_contract(
        &self,
        reference: ReferenceData,
        timeframes: &[Timeframe],
    ) -> Result<Contract> {
        let mut tables: IndexMap<Timeframe, PriceTable> = IndexMap::new();

        let daily_path = self
            .path_for(&reference.symbol, reference.source, Timeframe::Daily)
            .context(format!("{} has no contract file", reference.symbol))?;

        for &timeframe in timeframes.iter().filter(|tf| !tf.is_daily()) {
            let Some(path) = self.path_for(&reference.symbol, reference.source, timeframe) else {
                continue;
            };
            if !path.exists() {
                warn!(
                    "no {} data for {} at {:?}, skipping",
                    timeframe, reference.symbol, path
                );
                continue;
            }
            tables.insert(timeframe, self.load_table(&path)?);
        }

        let daily = if daily_path.exists() {
            self.load_table(&daily_path)?
        } else {
            let Some((timeframe, intraday)) = tables.iter().min_by_key(|(tf, _)| **tf) else {
                bail!("No daily data for {} at {:?}", reference.symbol, daily_path);
            };
            warn!(
                "no daily file for {}, resampling {} bars",
                reference.symbol, timeframe
            );
            resample_daily(intraday)
        };
        tables.insert(Timeframe::Daily, daily);

        let symbol = reference.symbol.clone();
        Contract::create(reference, tables).context(format!("Failed to build contract {}", symbol))
    }

    //loads every reference, sorted by (product, expiration)
    pub fn load_contracts(
        &self,
        references: Vec<ReferenceData>,
        timeframes: &[Timeframe],
    ) -> Result<Vec<Contract>> {
        let mut contracts = references
            .into_iter()
            .map(|reference| self.load_contract(reference, timeframes))
            .collect::<Result<Vec<_>>>()?;
        sort_contracts(&mut contracts);

        info!(
            "loaded {} contracts from {:?}",
            contracts.len(),
            self.root
        );
        Ok(contracts)
    }

    //lists the contracts of a product that have a daily file
    pub fn discover(&self, product: &str, source: DataSource) -> Result<Vec<Symbol>> {
        let dir = self.root.join(source.as_str()).join(Timeframe::Daily.dir_name());
        let pattern = Regex::new(&format!(
            r"^{}_(?P<month>[FGHJKMNQUVXZ])(?P<year>\d{{2}})_{}\.txt$",
            regex::escape(&product.to_uppercase()),
            Timeframe::Daily.label()
        ))?;

        let mut symbols = Vec::new();
        for entry in std::fs::read_dir(&dir).context(format!("Failed to read {:?}", dir))? {
            let name = entry?.file_name();
            let Some(captures) = name.to_str().and_then(|n| pattern.captures(n)) else {
                continue;
            };
            let code = format!(
                "{}{}{}",
                product.to_uppercase(),
                &captures["month"],
                &captures["year"]
            );
            symbols.push(Symbol::parse(&code)?);
        }

        symbols.sort_by_key(|s| (s.year(), s.month_code().map(MonthCode::month)));
        Ok(symbols)
    }
}
