use serde::{Deserialize, Serialize};
use std::fmt;

//cme delivery month letters, january through december
pub const MONTH_CODES: [char; 12] = ['F', 'G', 'H', 'J', 'K', 'M', 'N', 'Q', 'U', 'V', 'X', 'Z'];

//futures delivery month code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MonthCode {
    F,
    G,
    H,
    J,
    K,
    M,
    N,
    Q,
    U,
    V,
    X,
    Z,
}

const ALL: [MonthCode; 12] = [
    MonthCode::F,
    MonthCode::G,
    MonthCode::H,
    MonthCode::J,
    MonthCode::K,
    MonthCode::M,
    MonthCode::N,
    MonthCode::Q,
    MonthCode::U,
    MonthCode::V,
    MonthCode::X,
    MonthCode::Z,
];

impl MonthCode {
    //parse a month letter, case-insensitive
    pub fn from_char(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        MONTH_CODES
            .iter()
            .position(|&code| code == upper)
            .map(|index| ALL[index])
    }

    //month code for a calendar month (1 = january)
    pub fn from_month(month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(ALL[(month - 1) as usize])
        } else {
            None
        }
    }

    //calendar month number (1 = january)
    pub fn month(self) -> u32 {
        self as u32 + 1
    }

    pub fn as_char(self) -> char {
        MONTH_CODES[self as usize]
    }
}

impl fmt::Display for MonthCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
