pub mod aggregation;
pub mod bar;
pub mod catalog;
pub mod loader;
pub mod table;
pub mod timeframe;

pub use aggregation::resample_daily;
pub use bar::{Bar, BarError};
pub use catalog::Catalog;
pub use loader::{load_csv, load_csv_validated, parse_timestamp};
pub use table::{find_disorder, PriceTable, TableError};
pub use timeframe::Timeframe;
