//continuous futures series stitched from individual contracts

pub mod config;
pub mod data;
pub mod instrument;
pub mod reference;
pub mod report;
pub mod roll;
pub mod stitch;
pub mod symbol;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::config::StitchConfiguration;
    pub use crate::data::{load_csv, resample_daily, Bar, Catalog, PriceTable, Timeframe};
    pub use crate::instrument::{sort_contracts, ContinuousContract, Contract, Instrument};
    pub use crate::reference::{AssetClass, DataSource, ReferenceData};
    pub use crate::report::{
        pretty_print_instruments, write_all_series_csv, write_rolls_csv, RollReport,
    };
    pub use crate::roll::{roll_schedule, RollError, RollEvent, RollParameters, RolloverRule};
    pub use crate::stitch::{
        build_all, build_continuous, stitch, BuildJob, ContinuityError, ContinuousBuild,
        StitchError,
    };
    pub use crate::symbol::{MonthCode, ParseError, Symbol};
}
