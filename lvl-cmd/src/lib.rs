//! Command implementations for the leveling survey CLI.
//!
//! Provides subcommands to convert a survey file into the wide,
//! baseline-relative elevation table and to inspect a survey without
//! writing anything.

use clap::{Args, Subcommand};
use lvl_data::{AggregatePolicy, CoordinatePolicy, DuplicatePolicy};
use lvl_io::{loader::LoadOptions, ColumnNames, OutputFormat};
use std::path::PathBuf;

pub mod convert;
pub mod inspect;

#[derive(Subcommand)]
pub enum Command {
    /// Convert a survey file into a table of elevation changes per point and date
    Convert {
        /// Survey file (.xlsx, .xlsm, .xltx, .xltm, .xls, .ods, .dbf, .csv, .txt)
        #[arg(short = 'f', long)]
        file: PathBuf,

        /// Output path [default: <file stem>_relative.csv next to the input]
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        policy: PolicyArgs,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// Load and normalize a survey file, then report points and survey dates
    Inspect {
        /// Survey file (.xlsx, .xlsm, .xltx, .xltm, .xls, .ods, .dbf, .csv, .txt)
        #[arg(short = 'f', long)]
        file: PathBuf,

        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        policy: PolicyArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Where the required columns live in the source file.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Header of the point name column
    #[arg(long, default_value = "name")]
    pub point_column: String,

    /// Header of the X coordinate column
    #[arg(long, default_value = "x")]
    pub x_column: String,

    /// Header of the Y coordinate column
    #[arg(long, default_value = "y")]
    pub y_column: String,

    /// Header of the elevation column
    #[arg(long, default_value = "z")]
    pub z_column: String,

    /// Header of the measurement date column
    #[arg(long, default_value = "date")]
    pub date_column: String,

    /// Field delimiter of .csv/.txt input [default: sniffed from the header]
    #[arg(long)]
    pub input_delimiter: Option<char>,
}

impl InputArgs {
    pub fn load_options(&self) -> anyhow::Result<LoadOptions> {
        let delimiter = self
            .input_delimiter
            .map(|c| ascii_byte(c, "input delimiter"))
            .transpose()?;
        Ok(LoadOptions {
            columns: ColumnNames {
                point: self.point_column.clone(),
                x: self.x_column.clone(),
                y: self.y_column.clone(),
                z: self.z_column.clone(),
                date: self.date_column.clone(),
            },
            delimiter,
        })
    }
}

/// How conflicting observations of one point are resolved.
#[derive(Args, Debug, Clone)]
pub struct PolicyArgs {
    /// Coordinates that change between observations of one point: overwrite or strict
    #[arg(long, default_value_t = CoordinatePolicy::Overwrite)]
    pub coordinate_policy: CoordinatePolicy,

    /// Several elevations of one point on one day: overwrite, average or strict
    #[arg(long, default_value_t = DuplicatePolicy::Overwrite)]
    pub duplicate_policy: DuplicatePolicy,
}

impl PolicyArgs {
    pub fn aggregate_policy(&self) -> AggregatePolicy {
        AggregatePolicy {
            coordinates: self.coordinate_policy,
            duplicates: self.duplicate_policy,
        }
    }
}

/// Text layout of the written table.
#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    /// Field delimiter of the output
    #[arg(long, default_value_t = ';')]
    pub delimiter: char,

    /// Decimal separator of the output, e.g. ',' for decimal-comma locales
    #[arg(long, default_value_t = '.')]
    pub decimal_separator: char,

    /// Decimals written for coordinates and elevation changes
    #[arg(long, default_value_t = 3)]
    pub precision: usize,

    /// chrono format of the date column headers
    #[arg(long, default_value = "%Y-%m-%d")]
    pub date_format: String,

    /// Header of the point name column in the output
    #[arg(long, default_value = "name")]
    pub point_header: String,

    /// Header of the X column in the output
    #[arg(long, default_value = "x")]
    pub x_header: String,

    /// Header of the Y column in the output
    #[arg(long, default_value = "y")]
    pub y_header: String,
}

impl FormatArgs {
    pub fn output_format(&self) -> anyhow::Result<OutputFormat> {
        Ok(OutputFormat {
            delimiter: ascii_byte(self.delimiter, "delimiter")?,
            decimal_separator: self.decimal_separator,
            precision: self.precision,
            point_header: self.point_header.clone(),
            x_header: self.x_header.clone(),
            y_header: self.y_header.clone(),
            date_format: self.date_format.clone(),
        })
    }
}

fn ascii_byte(c: char, what: &str) -> anyhow::Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        anyhow::bail!("{what} must be a single ASCII character, got {c:?}")
    }
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Convert {
            file,
            output,
            input,
            policy,
            format,
        } => convert::run_convert(&file, output.as_deref(), &input, &policy, &format),
        Command::Inspect {
            file,
            input,
            policy,
            json,
        } => inspect::run_inspect(&file, &input, &policy, json),
    }
}
