//! Code to parse the command line using `clap`, and definitions of the parsed
//! result

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use std::path::PathBuf;

use crate::fields::FieldSelector;

/// What the command line asks for.
pub enum Action {
    /// Print the usage text to standard error
    Help,
    /// Print the program name and version
    Version,
    /// Total the `files` (standard input if there are none)
    Total(Args),
}

/// Returns the parsed command line. Malformed command lines, including a bad
/// field list, are reported by `clap`, which prints usage to standard error
/// and exits with a failure status.
#[must_use]
pub fn parsed() -> Action {
    CliArgs::parse().into()
}

/// The inputs and the immutable configuration they're totalled with.
pub struct Args {
    /// How to total
    pub config: Config,
    /// Input files from the command line, in order
    pub files: Vec<PathBuf>,
}

/// Keep a running total per column, or one total per line?
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub enum Orientation {
    /// One total per selected column, per file and across files
    #[default]
    Vertical,
    /// One total per line, printed as soon as the line is read
    Horizontal,
}

/// The number type totals are kept in.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub enum NumericMode {
    /// 64-bit signed integers
    #[default]
    Integer,
    /// Double precision floating point
    Double,
}

/// What to do about an input file that can't be opened.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub enum OpenFailure {
    /// Stop, without reading any later file
    #[default]
    Abort,
    /// Skip the file, read the rest, and fail at the end
    Skip,
}

/// Everything the driver, accumulator and reporter need to know, settled
/// once from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    /// Splits input lines into fields
    pub separator: Vec<u8>,
    /// Joins the totals in a report row
    pub output_separator: Vec<u8>,
    /// The columns to total
    pub fields: FieldSelector,
    /// Suppress per-file rows
    pub totals_only: bool,
    /// Prefix rows with their file name, or `Totals`
    pub header: bool,
    /// Suppress the message for files that can't be opened
    pub quiet: bool,
    /// Column totals or line totals
    pub orientation: Orientation,
    /// Integer or floating point totals
    pub numeric: NumericMode,
    /// Abort on, or skip, files that can't be opened
    pub on_open_failure: OpenFailure,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            separator: b",".to_vec(),
            output_separator: b",".to_vec(),
            fields: FieldSelector::default(),
            totals_only: false,
            header: false,
            quiet: false,
            orientation: Orientation::default(),
            numeric: NumericMode::default(),
            on_open_failure: OpenFailure::default(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "total",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
/// `CliArgs` contains the parsed command line.
struct CliArgs {
    /// Input field separator
    #[arg(short = 's', long = "separator", default_value = ",", allow_hyphen_values = true, value_parser = NonEmptyStringValueParser::new())]
    separator: String,
    /// Output field separator (defaults to the input separator)
    #[arg(short = 'S', long = "output-separator", allow_hyphen_values = true, value_parser = NonEmptyStringValueParser::new())]
    output_separator: Option<String>,
    /// Fields to total, e.g. `1,3-5,7-`
    #[arg(short = 'f', long = "field", allow_hyphen_values = true)]
    field: Option<FieldSelector>,
    #[arg(short = 't', long = "totals-only")]
    totals_only: bool,
    #[arg(short = 'z', long = "horizontal")]
    horizontal: bool,
    #[arg(short = 'd', long = "doubles")]
    doubles: bool,
    #[arg(short = 'H', long = "header")]
    header: bool,
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
    #[arg(short = 'k', long = "keep-going")]
    keep_going: bool,
    #[arg(short = 'h', long = "help")]
    help: bool,
    #[arg(short = 'v', long = "version")]
    version: bool,
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

impl From<CliArgs> for Action {
    fn from(parsed: CliArgs) -> Self {
        if parsed.help {
            return Action::Help;
        }
        if parsed.version {
            return Action::Version;
        }
        let orientation =
            if parsed.horizontal { Orientation::Horizontal } else { Orientation::Vertical };
        let horizontal = orientation == Orientation::Horizontal;
        let separator = parsed.separator.into_bytes();
        let output_separator =
            parsed.output_separator.map_or_else(|| separator.clone(), String::into_bytes);
        let config = Config {
            separator,
            output_separator,
            fields: parsed.field.unwrap_or_default(),
            // Line totals have neither per-file rows to suppress nor labels.
            totals_only: parsed.totals_only && !horizontal,
            header: parsed.header && !horizontal,
            quiet: parsed.quiet,
            orientation,
            numeric: if parsed.doubles { NumericMode::Double } else { NumericMode::Integer },
            on_open_failure: if parsed.keep_going { OpenFailure::Skip } else { OpenFailure::Abort },
        };
        log::debug!("{config:?}");
        Action::Total(Args { config, files: parsed.files })
    }
}
