use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use rollchain::prelude::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rollchain")]
#[command(about = "Builds continuous futures series from individual contracts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //build a continuous series
    Build {
        //json configuration file, flags below override its values
        #[arg(long)]
        config: Option<PathBuf>,

        //catalog root directory
        #[arg(long)]
        data: Option<PathBuf>,

        //product code (eg es, 6e)
        #[arg(long)]
        product: Option<String>,

        //data source (firstrate, tradingview, databento)
        #[arg(long)]
        source: Option<String>,

        //contract codes, defaults to every contract found in the catalog
        #[arg(long, value_delimiter = ',')]
        contracts: Vec<String>,

        //timeframes to stitch besides daily (eg 1min,5min)
        #[arg(long, value_delimiter = ',')]
        timeframes: Vec<String>,

        //reject bars failing ohlc validation
        #[arg(long)]
        validate_bars: bool,

        //rollover rule (expiry, oi)
        #[arg(long)]
        rule: Option<String>,

        //trailing shared days searched for open interest crossovers
        #[arg(long)]
        days_to_expiration: Option<usize>,

        //which crossover triggers the roll
        #[arg(long)]
        occurrence: Option<usize>,

        //largest tolerated gap after an expiration, in days
        #[arg(long)]
        max_gap_days: Option<u32>,

        //output path for the continuous series csv, intraday timeframes get a suffixed file each
        #[arg(long)]
        output_series_csv: Option<PathBuf>,

        //output path for the roll events csv
        #[arg(long)]
        output_rolls_csv: Option<PathBuf>,
    },

    //list the contracts in a catalog
    Inspect {
        //catalog root directory
        #[arg(long)]
        data: PathBuf,

        //product code (eg es, 6e)
        #[arg(long)]
        product: String,

        //data source (firstrate, tradingview, databento)
        #[arg(long, default_value = "firstrate")]
        source: String,
    },

    //write a default configuration file
    InitConfig {
        //where to write the json file
        #[arg(long, default_value = "rollchain.json")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            config,
            data,
            product,
            source,
            contracts,
            timeframes,
            validate_bars,
            rule,
            days_to_expiration,
            occurrence,
            max_gap_days,
            output_series_csv,
            output_rolls_csv,
        } => {
            let mut configuration = match config {
                Some(path) => StitchConfiguration::from_json_file(&path)?,
                None => StitchConfiguration::default(),
            };

            if let Some(data) = data {
                configuration.data_root = data;
            }
            if let Some(product) = product {
                configuration.product = product.to_uppercase();
            }
            if let Some(source) = source {
                configuration.source = DataSource::parse(&source)
                    .ok_or_else(|| anyhow!("Unknown data source: {}", source))?;
            }
            if !contracts.is_empty() {
                configuration.contracts = contracts;
            }
            if !timeframes.is_empty() {
                let mut parsed = vec![Timeframe::Daily];
                for label in &timeframes {
                    let timeframe = Timeframe::parse(label)
                        .ok_or_else(|| anyhow!("Unknown timeframe: {}", label))?;
                    if !parsed.contains(&timeframe) {
                        parsed.push(timeframe);
                    }
                }
                configuration.timeframes = parsed;
            }
            if validate_bars {
                configuration.validate_bars = true;
            }
            if let Some(rule) = rule {
                configuration.rule = RolloverRule::parse(&rule)
                    .ok_or_else(|| anyhow!("Unknown rollover rule: {}", rule))?;
            }
            if let Some(days) = days_to_expiration {
                configuration.params.days_to_expiration = days;
            }
            if let Some(occurrence) = occurrence {
                configuration.params.occurrence = occurrence;
            }
            if let Some(max_gap_days) = max_gap_days {
                configuration.params.max_gap_days = max_gap_days;
            }
            if output_series_csv.is_some() {
                configuration.output_series_csv = output_series_csv;
            }
            if output_rolls_csv.is_some() {
                configuration.output_rolls_csv = output_rolls_csv;
            }

            run_build(&configuration)?;
        }
        Commands::Inspect {
            data,
            product,
            source,
        } => {
            let configuration = StitchConfiguration {
                data_root: data,
                product: product.to_uppercase(),
                source: DataSource::parse(&source)
                    .ok_or_else(|| anyhow!("Unknown data source: {}", source))?,
                ..StitchConfiguration::default()
            };

            let contracts = configuration
                .catalog()
                .load_contracts(configuration.references()?, &[Timeframe::Daily])?;
            let instruments: Vec<Instrument> = contracts.into_iter().map(Instrument::from).collect();
            pretty_print_instruments(&instruments);
        }
        Commands::InitConfig { path } => {
            StitchConfiguration::default().to_json_file(&path)?;
            println!("Configuration written to {:?}", path);
        }
    }

    Ok(())
}

fn run_build(configuration: &StitchConfiguration) -> Result<()> {
    println!("Rollchain Continuous Futures Builder");
    println!("====================================\n");

    let catalog = configuration.catalog();
    let contracts = catalog
        .load_contracts(configuration.references()?, &configuration.timeframes)
        .context(format!("Failed to load contracts from {:?}", catalog.root()))?;

    println!(
        "Loaded {} {} contracts, rule: {}\n",
        contracts.len(),
        configuration.product,
        configuration.rule
    );

    let build = build_continuous(&contracts, configuration.rule, &configuration.params)
        .context(format!("Failed to build continuous {}", configuration.product))?;

    let instruments = vec![Instrument::from(build.contract.clone())];
    pretty_print_instruments(&instruments);
    println!();

    println!("Roll Schedule");
    println!("=============\n");
    let report = RollReport::from_rolls(&contracts, &build.rolls);
    report.pretty_print_table();

    if let Some(series_path) = &configuration.output_series_csv {
        println!();
        for path in write_all_series_csv(&build.contract, series_path)? {
            println!("Continuous series saved to {:?}", path);
        }
    }

    if let Some(rolls_path) = &configuration.output_rolls_csv {
        write_rolls_csv(&report, rolls_path)?;
        println!("Roll events saved to {:?}", rolls_path);
    }

    Ok(())
}
