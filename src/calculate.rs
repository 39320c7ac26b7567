//! Houses the `calculate` function
//!

use anyhow::Result;
use log::{debug, warn};

use crate::accumulate::{line_total, Accumulator};
use crate::args::{Config, NumericMode, OpenFailure, Orientation};
use crate::report::Reporter;
use crate::split::Splitter;
use crate::tally::Tally;

/// The `calculate` function's only requirements for its operands are that
/// they have a label and implement `for_byte_line`. The `Operand` trait
/// codifies that.
pub trait Operand {
    /// The name the operand's totals are reported under
    fn label(&self) -> &str;
    /// The call `o.for_byte_line(|line| ...)` calls the given closure for
    /// each line of `o`, without its line terminator.
    fn for_byte_line(self, for_each_line: impl FnMut(&[u8])) -> Result<()>;
}

/// What became of the operands of a successful run.
#[derive(Debug, Default)]
pub struct Summary {
    /// How many operands were read to the end
    pub processed: usize,
    /// The errors for operands skipped because they couldn't be opened
    /// (only with `OpenFailure::Skip`)
    pub skipped: Vec<anyhow::Error>,
}

/// Totals the selected fields of each operand and writes the report to `out`:
///
/// * In vertical mode, one row per operand (unless `totals_only`), then a row
///   of grand totals if more than one operand was read.
/// * In horizontal mode, one line total per input line, and nothing else.
///
/// An operand that couldn't be opened ends the run with its error, after
/// flushing whatever was already reported, unless `config.on_open_failure`
/// says to skip it.
pub fn calculate<O: Operand>(
    config: &Config,
    operands: impl IntoIterator<Item = Result<O>>,
    out: impl std::io::Write,
) -> Result<Summary> {
    match config.numeric {
        NumericMode::Integer => calculate_as::<i64, O>(config, operands, out),
        NumericMode::Double => calculate_as::<f64, O>(config, operands, out),
    }
}

fn calculate_as<N: Tally, O: Operand>(
    config: &Config,
    operands: impl IntoIterator<Item = Result<O>>,
    out: impl std::io::Write,
) -> Result<Summary> {
    let splitter = Splitter::new(&config.separator);
    let mut reporter = Reporter::new(config, out);
    let mut accumulator = Accumulator::<N>::new(config.fields);
    let mut summary = Summary::default();

    for operand in operands {
        let operand = match operand {
            Ok(operand) => operand,
            Err(e) if config.on_open_failure == OpenFailure::Skip => {
                warn!("skipping: {e:#}");
                summary.skipped.push(e);
                continue;
            }
            Err(e) => {
                reporter.flush()?;
                return Err(e);
            }
        };
        let label = operand.label().to_owned();
        debug!("totalling {label}");

        match config.orientation {
            Orientation::Vertical => {
                accumulator.next_file();
                let read = operand.for_byte_line(|line| accumulator.add_record(splitter.split(line)));
                end_of_input(read);
                if !config.totals_only {
                    reporter.report(Some(&label), accumulator.file_totals())?;
                }
            }
            Orientation::Horizontal => {
                let mut write_error = None;
                let read = operand.for_byte_line(|line| {
                    if write_error.is_none() {
                        let total: N = line_total(config.fields, splitter.split(line));
                        write_error = reporter.line_total(total).err();
                    }
                });
                if let Some(e) = write_error {
                    return Err(e);
                }
                end_of_input(read);
            }
        }
        summary.processed += 1;
    }

    if summary.processed > 1 && config.orientation == Orientation::Vertical {
        reporter.report(Some("Totals"), accumulator.grand_totals())?;
    }
    reporter.flush()?;
    Ok(summary)
}

// A read error after a successful open ends that input like end of file does.
fn end_of_input(read: Result<()>) {
    if let Err(e) = read {
        warn!("{e:#}; treating as end of input");
    }
}
