use crate::data::bar::Bar;
use crate::data::table::PriceTable;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::{ReaderBuilder, StringRecord};
use log::info;
use std::path::Path;

//firstrate column order; open interest is only present in some files
const TIMESTAMP: usize = 0;
const OPEN: usize = 1;
const HIGH: usize = 2;
const LOW: usize = 3;
const CLOSE: usize = 4;
const VOLUME: usize = 5;
const OPEN_INTEREST: usize = 6;

//loads a headerless firstrate csv into a price table, bars are kept as found
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<PriceTable> {
    read_table(path.as_ref(), false)
}

//same as load_csv but every bar must pass ohlc validation
pub fn load_csv_validated<P: AsRef<Path>>(path: P) -> Result<PriceTable> {
    read_table(path.as_ref(), true)
}

fn read_table(path: &Path, validate: bool) -> Result<PriceTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context(format!("Failed to open CSV file: {:?}", path))?;

    let mut bars = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let line = index + 1;
        let record = result.context(format!("Failed to read CSV record at line {}", line))?;

        let bar = parse_record(&record, line, validate)
            .context(format!("Invalid record in {:?}", path))?;
        bars.push(bar);
    }

    //sorts by timestamp, duplicates are an error rather than silently dropped
    let table = PriceTable::new(bars).context(format!("Invalid price series in {:?}", path))?;

    info!("loaded {} bars from {:?}", table.len(), path);
    Ok(table)
}

fn parse_record(record: &StringRecord, line: usize, validate: bool) -> Result<Bar> {
    if record.len() < 6 {
        bail!(
            "line {}: expected at least 6 columns, found {}",
            line,
            record.len()
        );
    }

    let timestamp = parse_timestamp(&record[TIMESTAMP])
        .context(format!("line {}: bad timestamp '{}'", line, &record[TIMESTAMP]))?;

    let number = |column: usize, name: &str| -> Result<f64> {
        record[column]
            .parse::<f64>()
            .context(format!("line {}: bad {} '{}'", line, name, &record[column]))
    };

    let open = number(OPEN, "open")?;
    let high = number(HIGH, "high")?;
    let low = number(LOW, "low")?;
    let close = number(CLOSE, "close")?;
    let volume = number(VOLUME, "volume")?;
    let open_interest = match record.get(OPEN_INTEREST) {
        Some(value) if !value.is_empty() => Some(number(OPEN_INTEREST, "open interest")?),
        _ => None,
    };

    if validate {
        Bar::new(timestamp, open, high, low, close, volume, open_interest)
            .context(format!("line {}: invalid bar", line))
    } else {
        Ok(Bar::new_unchecked(
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            open_interest,
        ))
    }
}

//accepts dates, date-times with or without seconds, and rfc3339
//naive values are taken as utc
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(datetime.and_utc());
        }
    }

    let parsed = DateTime::parse_from_rfc3339(value)
        .context(format!("unrecognised timestamp '{}'", value))?;
    Ok(parsed.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    fn write_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    #[test]
    fn parses_timestamp_formats() {
        let midnight = Utc.with_ymd_and_hms(2024, 6, 14, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-06-14").unwrap(), midnight);
        assert_eq!(parse_timestamp("2024-06-14 00:00:00").unwrap(), midnight);
        assert_eq!(parse_timestamp("2024-06-14 00:00").unwrap(), midnight);
        assert_eq!(parse_timestamp("2024-06-14T02:00:00+02:00").unwrap(), midnight);
        assert!(parse_timestamp("14/06/2024").is_err());
    }

    #[test]
    fn loads_rows_with_and_without_open_interest() {
        let file = write_file(
            "2024-06-04,1.08,1.09,1.07,1.085,1200\n\
             2024-06-03,1.07,1.08,1.06,1.075,1000,250000\n",
        );

        let table = load_csv(file.path()).expect("loads");
        assert_eq!(table.len(), 2);
        let bars = table.bars();
        assert_eq!(bars[0].open_interest, Some(250000.0));
        assert_eq!(bars[1].open_interest, None);
        assert!(bars[0].timestamp < bars[1].timestamp);
    }

    #[test]
    fn rejects_duplicate_dates() {
        let file = write_file(
            "2024-06-03,1,1,1,1,1\n\
             2024-06-03,1,1,1,1,1\n",
        );
        assert!(load_csv(file.path()).is_err());
    }

    #[test]
    fn validation_is_opt_in() {
        let file = write_file("2024-06-03,1.0,0.9,1.1,1.0,10\n");
        assert!(load_csv(file.path()).is_ok());
        assert!(load_csv_validated(file.path()).is_err());
    }

    #[test]
    fn short_rows_are_errors() {
        let file = write_file("2024-06-03,1.0,1.0\n");
        let err = load_csv(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("expected at least 6 columns"));
    }
}
