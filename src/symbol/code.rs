use crate::symbol::month::MonthCode;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

//product of letters/digits, one month letter, 2-4 digit year (eg ESH2020, 6EM24)
static INDIVIDUAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<product>[A-Z0-9]+)(?P<month>[FGHJKMNQUVXZ])(?P<year>\d{2,4})$")
        .expect("individual contract pattern compiles")
});

//product ending in a letter, then every trailing digit as the series, then a bang (eg ES1!, ES12!)
static CONTINUOUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<product>[A-Z0-9]*[A-Z])(?P<series>\d+)!$")
        .expect("continuous contract pattern compiles")
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to parse '{code}' as {expected} contract code")]
pub struct ParseError {
    pub code: String,
    pub expected: &'static str,
}

impl ParseError {
    fn new(code: &str, expected: &'static str) -> Self {
        ParseError {
            code: code.to_string(),
            expected,
        }
    }
}

//identity of a futures contract, either a single expiry or a continuation series
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Symbol {
    Individual {
        product: String,
        month: MonthCode,
        year: u16,
    },
    Continuous {
        product: String,
        series: u32,
    },
}

impl Symbol {
    //parses either an individual or a continuous code
    pub fn parse(code: &str) -> Result<Self, ParseError> {
        Self::parse_individual(code)
            .or_else(|_| Self::parse_continuous(code))
            .map_err(|_| ParseError::new(code, "an individual or continuous"))
    }

    pub fn parse_individual(code: &str) -> Result<Self, ParseError> {
        let normalized = code.trim().to_ascii_uppercase();
        let caps = INDIVIDUAL
            .captures(&normalized)
            .ok_or_else(|| ParseError::new(code, "an individual"))?;

        let month = caps["month"]
            .chars()
            .next()
            .and_then(MonthCode::from_char)
            .ok_or_else(|| ParseError::new(code, "an individual"))?;
        let year_digits = &caps["year"];
        let year: u16 = year_digits
            .parse()
            .map_err(|_| ParseError::new(code, "an individual"))?;
        //two digit years are this century
        let year = if year_digits.len() == 2 { 2000 + year } else { year };

        Ok(Symbol::Individual {
            product: caps["product"].to_string(),
            month,
            year,
        })
    }

    pub fn parse_continuous(code: &str) -> Result<Self, ParseError> {
        let normalized = code.trim().to_ascii_uppercase();
        let caps = CONTINUOUS
            .captures(&normalized)
            .ok_or_else(|| ParseError::new(code, "a continuous"))?;
        let series = caps["series"]
            .parse()
            .map_err(|_| ParseError::new(code, "a continuous"))?;

        Ok(Symbol::Continuous {
            product: caps["product"].to_string(),
            series,
        })
    }

    //continuation symbol for a product (series 1 is the front month)
    pub fn continuous(product: &str, series: u32) -> Self {
        Symbol::Continuous {
            product: product.to_ascii_uppercase(),
            series,
        }
    }

    pub fn product_code(&self) -> &str {
        match self {
            Symbol::Individual { product, .. } | Symbol::Continuous { product, .. } => product,
        }
    }

    pub fn month_code(&self) -> Option<MonthCode> {
        match self {
            Symbol::Individual { month, .. } => Some(*month),
            Symbol::Continuous { .. } => None,
        }
    }

    pub fn year(&self) -> Option<u16> {
        match self {
            Symbol::Individual { year, .. } => Some(*year),
            Symbol::Continuous { .. } => None,
        }
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self, Symbol::Continuous { .. })
    }

    //dashed form used in catalogs (eg 6E-M-2024, ES-1)
    pub fn dashed(&self) -> String {
        match self {
            Symbol::Individual {
                product,
                month,
                year,
            } => format!("{}-{}-{}", product, month, year),
            Symbol::Continuous { product, series } => format!("{}-{}", product, series),
        }
    }

    //firstrate file stem (eg ES_H20); continuation series have no per-contract file
    pub fn firstrate_stem(&self) -> Option<String> {
        match self {
            Symbol::Individual {
                product,
                month,
                year,
            } => Some(format!("{}_{}{:02}", product, month, year % 100)),
            Symbol::Continuous { .. } => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Individual {
                product,
                month,
                year,
            } => write!(f, "{}{}{}", product, month, year),
            Symbol::Continuous { product, series } => write!(f, "{}{}!", product, series),
        }
    }
}

impl FromStr for Symbol {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbol::parse(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Symbol::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Symbol::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_individual_codes() {
        let sym = Symbol::parse("ESH2020").expect("valid code");
        assert_eq!(sym.product_code(), "ES");
        assert_eq!(sym.month_code(), Some(MonthCode::H));
        assert_eq!(sym.year(), Some(2020));

        let sym = Symbol::parse("6em24").expect("lowercase is accepted");
        assert_eq!(sym.product_code(), "6E");
        assert_eq!(sym.month_code(), Some(MonthCode::M));
        assert_eq!(sym.year(), Some(2024));
        assert_eq!(sym.to_string(), "6EM2024");
    }

    #[test]
    fn parses_continuous_codes() {
        let sym = Symbol::parse("es1!").expect("valid code");
        assert!(sym.is_continuous());
        assert_eq!(sym.product_code(), "ES");
        assert_eq!(sym.month_code(), None);
        assert_eq!(sym, Symbol::continuous("es", 1));
        assert_eq!(sym.to_string(), "ES1!");
    }

    #[test]
    fn series_takes_every_trailing_digit() {
        let sym = Symbol::parse("ES12!").expect("valid code");
        assert_eq!(sym, Symbol::continuous("ES", 12));
        assert_eq!(sym.to_string(), "ES12!");

        let sym = Symbol::parse_continuous("6E2!").expect("valid code");
        assert_eq!(sym.product_code(), "6E");
        assert!(Symbol::parse_continuous("12!").is_err());
    }

    #[test]
    fn double_bang_fails_both_patterns() {
        assert!(Symbol::parse_individual("E6X24!!").is_err());
        assert!(Symbol::parse_continuous("E6X24!!").is_err());
        let err = Symbol::parse("E6X24!!").expect_err("must fail");
        assert_eq!(err.code, "E6X24!!");
    }

    #[test]
    fn rejects_malformed_codes() {
        for code in ["", "ES", "ESA24", "ESH2", "ESH20201", "ES-H-2020", "ES!", "ES H24"] {
            assert!(Symbol::parse(code).is_err(), "{code:?} should not parse");
        }
    }

    #[test]
    fn patterns_are_exclusive() {
        assert!(Symbol::parse_continuous("ESH2020").is_err());
        assert!(Symbol::parse_individual("ES1!").is_err());
    }

    #[test]
    fn renders_catalog_forms() {
        let sym = Symbol::parse("6EM2024").expect("valid code");
        assert_eq!(sym.dashed(), "6E-M-2024");
        assert_eq!(sym.firstrate_stem().as_deref(), Some("6E_M24"));
        assert_eq!(Symbol::continuous("ES", 1).firstrate_stem(), None);
    }

    #[test]
    fn serializes_as_code_string() {
        let sym = Symbol::parse("NQZ25").expect("valid code");
        let json = serde_json::to_string(&sym).expect("serializes");
        assert_eq!(json, "\"NQZ2025\"");
        let back: Symbol = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, sym);
        assert!(serde_json::from_str::<Symbol>("\"NOPE!!\"").is_err());
    }
}
