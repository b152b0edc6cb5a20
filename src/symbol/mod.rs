pub mod code;
pub mod month;

pub use code::{ParseError, Symbol};
pub use month::{MonthCode, MONTH_CODES};
