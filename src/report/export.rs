use crate::data::Timeframe;
use crate::instrument::ContinuousContract;
use crate::report::roll_report::RollReport;
use anyhow::{Context, Result};
use log::info;
use std::io::Write;
use std::path::{Path, PathBuf};

//daily keeps the given path; other timeframes get their label before the extension
pub fn timeframe_path(base: &Path, timeframe: Timeframe) -> PathBuf {
    if timeframe.is_daily() {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match base.extension() {
        Some(ext) => format!("{}_{}.{}", stem, timeframe.label(), ext.to_string_lossy()),
        None => format!("{}_{}", stem, timeframe.label()),
    };
    base.with_file_name(name)
}

pub fn write_series_csv(
    series: &ContinuousContract,
    timeframe: Timeframe,
    path: &Path,
) -> Result<()> {
    let mut file =
        std::fs::File::create(path).context(format!("Failed to create {:?}", path))?;
    writeln!(
        file,
        "timestamp,open,high,low,close,volume,open_interest,contract"
    )?;

    for (bar, contract) in series.bars_with_sources(timeframe) {
        writeln!(
            file,
            "{},{},{},{},{},{},{},{}",
            bar.timestamp.to_rfc3339(),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume,
            bar.open_interest.map(|oi| oi.to_string()).unwrap_or_default(),
            contract
        )?;
    }

    Ok(())
}

//one file per stitched timeframe, returns the paths written
pub fn write_all_series_csv(series: &ContinuousContract, base: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for timeframe in series.timeframes() {
        let path = timeframe_path(base, timeframe);
        write_series_csv(series, timeframe, &path)?;
        info!("wrote {} {} series to {:?}", series.code(), timeframe, path);
        written.push(path);
    }
    Ok(written)
}

pub fn write_rolls_csv(report: &RollReport, path: &Path) -> Result<()> {
    let optional = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();

    let mut file =
        std::fs::File::create(path).context(format!("Failed to create {:?}", path))?;
    writeln!(file, "timestamp,from,to,front_close,back_close,gap")?;

    for row in &report.rows {
        writeln!(
            file,
            "{},{},{},{},{},{}",
            row.timestamp.to_rfc3339(),
            row.from,
            row.to,
            optional(row.front_close),
            optional(row.back_close),
            optional(row.gap)
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Bar, PriceTable};
    use crate::instrument::Contract;
    use crate::reference::ReferenceData;
    use crate::roll::{RollEvent, RolloverRule};
    use crate::stitch::stitch;
    use crate::symbol::Symbol;
    use chrono::{TimeZone, Utc};
    use indexmap::IndexMap;

    fn contract(code: &str, days: &[u32], close: f64) -> Contract {
        let at = |d: u32, h: u32| Utc.with_ymd_and_hms(2024, 6, d, h, 0, 0).unwrap();
        let daily = days
            .iter()
            .map(|&d| Bar::new_unchecked(at(d, 0), close, close, close, close, 1.0, None))
            .collect();
        let hourly = days
            .iter()
            .flat_map(|&d| [at(d, 9), at(d, 15)])
            .map(|ts| Bar::new_unchecked(ts, close, close, close, close, 1.0, Some(7.0)))
            .collect();
        let mut tables = IndexMap::new();
        tables.insert(Timeframe::Daily, PriceTable::new(daily).unwrap());
        tables.insert(Timeframe::Minutes(60), PriceTable::new(hourly).unwrap());
        Contract::create(ReferenceData::from_symbol(Symbol::parse(code).unwrap()), tables).unwrap()
    }

    #[test]
    fn names_files_per_timeframe() {
        let base = Path::new("out/es.csv");
        assert_eq!(timeframe_path(base, Timeframe::Daily), PathBuf::from("out/es.csv"));
        assert_eq!(
            timeframe_path(base, Timeframe::Minutes(5)),
            PathBuf::from("out/es_5min.csv")
        );
        assert_eq!(
            timeframe_path(Path::new("es"), Timeframe::Minutes(1)),
            PathBuf::from("es_1min")
        );
    }

    #[test]
    fn writes_every_stitched_timeframe() {
        let front = contract("ESM24", &[10, 11], 1.0);
        let back = contract("ESU24", &[10, 11, 12], 2.0);
        let rolls = vec![RollEvent {
            timestamp: Utc.with_ymd_and_hms(2024, 6, 11, 0, 0, 0).unwrap(),
            from: front.symbol().clone(),
            to: back.symbol().clone(),
        }];
        let series = stitch(&[&front, &back], &rolls, RolloverRule::CalendarExpiry).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let written = write_all_series_csv(&series, &dir.path().join("es.csv")).unwrap();
        assert_eq!(written.len(), 2);

        let daily = std::fs::read_to_string(dir.path().join("es.csv")).unwrap();
        assert_eq!(daily.lines().count(), 4);
        assert!(daily.lines().nth(1).unwrap().ends_with(",ESM2024"));

        let hourly = std::fs::read_to_string(dir.path().join("es_60min.csv")).unwrap();
        let lines: Vec<&str> = hourly.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[2].ends_with(",7,ESM2024"));
        assert!(lines[3].ends_with(",7,ESU2024"));
    }
}
