use crate::data::{Catalog, Timeframe};
use crate::reference::{AssetClass, DataSource, ReferenceData};
use crate::roll::{RollParameters, RolloverRule};
use crate::symbol::Symbol;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

//complete continuous build configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StitchConfiguration {
    //data
    pub data_root: PathBuf,
    pub source: DataSource,
    pub asset_class: AssetClass,
    pub product: String,

    //contract codes to stitch, empty means every contract found in the catalog
    pub contracts: Vec<String>,
    pub timeframes: Vec<Timeframe>,

    //reject bars failing ohlc validation instead of keeping them as found
    pub validate_bars: bool,

    //rolling
    pub rule: RolloverRule,
    pub params: RollParameters,

    //optional output paths
    pub output_series_csv: Option<PathBuf>,
    pub output_rolls_csv: Option<PathBuf>,
}

impl Default for StitchConfiguration {
    fn default() -> Self {
        StitchConfiguration {
            data_root: PathBuf::from("data"),
            source: DataSource::FirstRate,
            asset_class: AssetClass::Fx,
            product: "6E".to_string(),
            contracts: Vec::new(),
            timeframes: vec![Timeframe::Daily],
            validate_bars: false,
            rule: RolloverRule::CalendarExpiry,
            params: RollParameters::default(),
            output_series_csv: None,
            output_rolls_csv: None,
        }
    }
}

impl StitchConfiguration {
    //load configuration from a JSON file
    pub fn from_json_file(path: &PathBuf) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        let config: StitchConfiguration = serde_json::from_str(&contents)
            .context(format!("Invalid config file: {:?}", path))?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn catalog(&self) -> Catalog {
        let catalog = Catalog::new(&self.data_root);
        if self.validate_bars {
            catalog.validated()
        } else {
            catalog
        }
    }

    //reference data for every configured contract, all from the same product
    pub fn references(&self) -> anyhow::Result<Vec<ReferenceData>> {
        let symbols = if self.contracts.is_empty() {
            self.catalog().discover(&self.product, self.source)?
        } else {
            self.contracts
                .iter()
                .map(|code| Symbol::parse_individual(code))
                .collect::<Result<Vec<_>, _>>()?
        };

        if symbols.is_empty() {
            bail!("No {} contracts found under {:?}", self.product, self.data_root);
        }
        if let Some(other) = symbols
            .iter()
            .find(|s| !s.product_code().eq_ignore_ascii_case(&self.product))
        {
            bail!("Contract {} is not a {} contract", other, self.product);
        }

        Ok(symbols
            .into_iter()
            .map(|symbol| ReferenceData::new(symbol, self.source, self.asset_class))
            .collect())
    }
}
