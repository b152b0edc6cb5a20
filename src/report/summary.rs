use crate::data::Timeframe;
use crate::instrument::Instrument;
use prettytable::{Cell, Row, Table};

//one table row per instrument: lifetime, bar count and timeframes
pub fn instrument_table(instruments: &[Instrument]) -> Table {
    let mut table = Table::new();

    table.add_row(Row::new(vec![
        Cell::new("Instrument"),
        Cell::new("Kind"),
        Cell::new("Activation"),
        Cell::new("Expiration"),
        Cell::new("Daily Bars"),
        Cell::new("Timeframes"),
    ]));

    for instrument in instruments {
        let kind = if instrument.is_continuous() {
            "continuous"
        } else {
            "individual"
        };
        let bars = instrument
            .table(Timeframe::Daily)
            .map_or(0, |table| table.len());
        let timeframes = instrument
            .timeframes()
            .iter()
            .map(|tf| tf.to_string())
            .collect::<Vec<_>>()
            .join(",");

        table.add_row(Row::new(vec![
            Cell::new(&instrument.name()),
            Cell::new(kind),
            Cell::new(&instrument.activation().format("%Y-%m-%d").to_string()),
            Cell::new(&instrument.expiration().format("%Y-%m-%d").to_string()),
            Cell::new(&format!("{}", bars)),
            Cell::new(&timeframes),
        ]));
    }

    table
}

pub fn pretty_print_instruments(instruments: &[Instrument]) {
    instrument_table(instruments).printstd();
}
