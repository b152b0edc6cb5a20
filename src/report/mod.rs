pub mod export;
pub mod roll_report;
pub mod summary;

pub use export::{timeframe_path, write_all_series_csv, write_rolls_csv, write_series_csv};
pub use roll_report::{RollReport, RollRow};
pub use summary::{instrument_table, pretty_print_instruments};
