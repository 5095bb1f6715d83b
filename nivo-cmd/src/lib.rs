//! Command implementations for the nivo CLI.
//!
//! Each subcommand loads the info and nivo tables, runs one selection
//! through the aggregation pipeline and prints the result as JSON.

use clap::{Args, Subcommand, ValueEnum};
use nivo_data::{
    aggregate_seasonal_window, compute, seasonal_grid, summarize_yearly, Precision,
    ReductionMode, Region, SeasonalField, Selection, DEFAULT_SCALE_FACTOR, SEASONAL_MONTHS,
};
use serde::Serialize;

pub mod load;
pub mod report;

/// Where to read the two tables from: a path or an http(s) URL, optionally `.gz`.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Station metadata table (ID,Nom,Latitude,Longitude,Altitude)
    #[arg(long, env = "NIVO_INFO")]
    pub info: String,

    /// Observation table (numer_sta,date,ht_neige,t)
    #[arg(long, env = "NIVO_DATA")]
    pub nivo: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModeArg {
    #[default]
    Max,
    Mean,
}

impl From<ModeArg> for ReductionMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Max => ReductionMode::Max,
            ModeArg::Mean => ReductionMode::Mean,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrecisionArg {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl From<PrecisionArg> for Precision {
    fn from(arg: PrecisionArg) -> Self {
        match arg {
            PrecisionArg::Day => Precision::Day,
            PrecisionArg::Week => Precision::Week,
            PrecisionArg::Month => Precision::Month,
            PrecisionArg::Year => Precision::Year,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldArg {
    #[default]
    Snow,
    Temperature,
}

impl From<FieldArg> for SeasonalField {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::Snow => SeasonalField::Snow,
            FieldArg::Temperature => SeasonalField::Temperature,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionArg {
    Alps,
    Pyrenees,
}

impl From<RegionArg> for Region {
    fn from(arg: RegionArg) -> Self {
        match arg {
            RegionArg::Alps => Region::Alps,
            RegionArg::Pyrenees => Region::Pyrenees,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Per-station snow height of one year, ordered by altitude
    Yearly {
        #[command(flatten)]
        data: DataArgs,

        #[arg(short, long)]
        year: i32,

        #[arg(short, long, value_enum, default_value_t = ModeArg::Max)]
        mode: ModeArg,

        /// Display multiplier applied to snow heights
        #[arg(long, default_value_t = DEFAULT_SCALE_FACTOR)]
        scale: f64,
    },

    /// Snow height time series of the stations near an altitude
    Altitude {
        #[command(flatten)]
        data: DataArgs,

        /// Target altitude in meters
        #[arg(short, long)]
        altitude: f64,

        #[arg(short, long, value_enum, default_value_t = ModeArg::Max)]
        mode: ModeArg,

        #[arg(short, long, value_enum, default_value_t = PrecisionArg::Month)]
        precision: PrecisionArg,
    },

    /// February-March heatmap grid, stations by descending altitude
    Seasonal {
        #[command(flatten)]
        data: DataArgs,

        #[arg(short, long, value_enum, default_value_t = FieldArg::Snow)]
        field: FieldArg,
    },

    /// Max, mean and temperature statistics per station and year
    Summary {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Snow height history of one station with its trend line
    Station {
        #[command(flatten)]
        data: DataArgs,

        #[arg(long)]
        id: String,
    },

    /// Station catalogue with altitude and year ranges
    Stations {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Framed per-massif points for the Voronoi map
    Map {
        #[command(flatten)]
        data: DataArgs,

        #[arg(short, long)]
        year: i32,

        #[arg(short, long, value_enum, default_value_t = ModeArg::Max)]
        mode: ModeArg,

        /// Both massifs when omitted
        #[arg(short, long, value_enum)]
        region: Option<RegionArg>,
    },
}

impl Command {
    fn data(&self) -> &DataArgs {
        match self {
            Command::Yearly { data, .. }
            | Command::Altitude { data, .. }
            | Command::Seasonal { data, .. }
            | Command::Summary { data }
            | Command::Station { data, .. }
            | Command::Stations { data }
            | Command::Map { data, .. } => data,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    let data = command.data();
    let dataset = load::load_dataset(&data.info, &data.nivo).await?;

    match command {
        Command::Yearly {
            year, mode, scale, ..
        } => {
            let selection = Selection::year(year)
                .with_mode(mode.into())
                .with_scale_factor(scale);
            print_json(&compute(&dataset, &selection))
        }
        Command::Altitude {
            altitude,
            mode,
            precision,
            ..
        } => {
            let selection = Selection::altitude(altitude)
                .with_mode(mode.into())
                .with_precision(precision.into());
            log::info!("altitude window {}", selection.readout());
            print_json(&compute(&dataset, &selection))
        }
        Command::Seasonal { field, .. } => {
            let seasonal = aggregate_seasonal_window(
                dataset.observations(),
                dataset.stations(),
                &SEASONAL_MONTHS,
            );
            print_json(&seasonal_grid(&seasonal, dataset.stations(), field.into()))
        }
        Command::Summary { .. } => {
            print_json(&summarize_yearly(dataset.stations(), dataset.observations()))
        }
        Command::Station { id, .. } => print_json(&report::station_report(&dataset, &id)?),
        Command::Stations { .. } => print_json(&report::catalog_report(&dataset)?),
        Command::Map {
            year, mode, region, ..
        } => print_json(&report::map_report(
            &dataset,
            year,
            mode.into(),
            region.map(Region::from),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    #[test]
    fn test_parse_altitude_defaults() {
        let cli = TestCli::try_parse_from([
            "nivo-cli", "altitude", "--info", "info.csv", "--nivo", "nivo.csv", "--altitude",
            "1800",
        ])
        .unwrap();
        let Command::Altitude {
            data,
            altitude,
            mode,
            precision,
        } = cli.command
        else {
            panic!("expected the altitude subcommand");
        };
        assert_eq!(data.info, "info.csv");
        assert_eq!(altitude, 1800.0);
        assert_eq!(mode, ModeArg::Max);
        assert_eq!(precision, PrecisionArg::Month);
    }

    #[test]
    fn test_parse_map_region() {
        let cli = TestCli::try_parse_from([
            "nivo-cli", "map", "--info", "i.csv", "--nivo", "n.csv", "--year", "2019",
            "--mode", "mean", "--region", "pyrenees",
        ])
        .unwrap();
        let Command::Map { mode, region, .. } = cli.command else {
            panic!("expected the map subcommand");
        };
        assert_eq!(ReductionMode::from(mode), ReductionMode::Mean);
        assert_eq!(region.map(Region::from), Some(Region::Pyrenees));
    }

    #[test]
    fn test_unknown_precision_is_rejected() {
        let result = TestCli::try_parse_from([
            "nivo-cli", "altitude", "--info", "i.csv", "--nivo", "n.csv", "--altitude", "1000",
            "--precision", "hour",
        ]);
        assert!(result.is_err());
    }
}
