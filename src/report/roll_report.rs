use crate::instrument::Contract;
use crate::roll::RollEvent;
use crate::symbol::Symbol;
use chrono::{DateTime, Utc};
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::borrow::Borrow;

//prices on either side of one roll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollRow {
    pub timestamp: DateTime<Utc>,
    pub from: Symbol,
    pub to: Symbol,
    pub front_close: Option<f64>,
    pub back_close: Option<f64>,
    pub gap: Option<f64>,
}

//summary of a roll schedule, gaps are back close minus front close
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollReport {
    pub rows: Vec<RollRow>,
    pub mean_gap: f64,
    pub gap_std_dev: f64,
    pub largest_gap: f64,
}

impl RollReport {
    pub fn from_rolls<C: Borrow<Contract>>(contracts: &[C], rolls: &[RollEvent]) -> Self {
        let find = |symbol: &Symbol| {
            contracts
                .iter()
                .map(|c| -> &Contract { c.borrow() })
                .find(|c| c.symbol() == symbol)
        };

        let rows: Vec<RollRow> = rolls
            .iter()
            .map(|roll| {
                //the front may have stopped trading before the roll
                let front_close = find(&roll.from)
                    .and_then(|c| c.daily().at_or_before(roll.timestamp))
                    .map(|bar| bar.close);
                let back_close = find(&roll.to)
                    .and_then(|c| c.daily().get(roll.timestamp))
                    .map(|bar| bar.close);
                let gap = front_close.zip(back_close).map(|(front, back)| back - front);

                RollRow {
                    timestamp: roll.timestamp,
                    from: roll.from.clone(),
                    to: roll.to.clone(),
                    front_close,
                    back_close,
                    gap,
                }
            })
            .collect();

        let gaps: Vec<f64> = rows.iter().filter_map(|row| row.gap).collect();
        let mean_gap = if gaps.is_empty() { 0.0 } else { gaps.iter().mean() };
        let gap_std_dev = if gaps.len() < 2 {
            0.0
        } else {
            gaps.iter().std_dev()
        };
        let largest_gap = gaps.iter().fold(0.0f64, |a, &b| if b.abs() > a.abs() { b } else { a });

        RollReport {
            rows,
            mean_gap,
            gap_std_dev,
            largest_gap,
        }
    }

    //prints rolls in a formatted table
    pub fn pretty_print_table(&self) {
        let mut table = Table::new();

        table.add_row(Row::new(vec![
            Cell::new("Roll Date"),
            Cell::new("From"),
            Cell::new("To"),
            Cell::new("Front Close"),
            Cell::new("Back Close"),
            Cell::new("Gap"),
        ]));

        let price = |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v));

        for row in &self.rows {
            table.add_row(Row::new(vec![
                Cell::new(&row.timestamp.format("%Y-%m-%d %H:%M").to_string()),
                Cell::new(&row.from.to_string()),
                Cell::new(&row.to.to_string()),
                Cell::new(&price(row.front_close)),
                Cell::new(&price(row.back_close)),
                Cell::new(&price(row.gap)),
            ]));
        }

        table.printstd();

        let mut stats = Table::new();
        stats.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));
        stats.add_row(Row::new(vec![
            Cell::new("Rolls"),
            Cell::new(&format!("{}", self.rows.len())),
        ]));
        stats.add_row(Row::new(vec![
            Cell::new("Mean Gap"),
            Cell::new(&format!("{:.4}", self.mean_gap)),
        ]));
        stats.add_row(Row::new(vec![
            Cell::new("Gap Std Dev"),
            Cell::new(&format!("{:.4}", self.gap_std_dev)),
        ]));
        stats.add_row(Row::new(vec![
            Cell::new("Largest Gap"),
            Cell::new(&format!("{:.4}", self.largest_gap)),
        ]));
        stats.printstd();
    }
}
