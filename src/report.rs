use anyhow::Result;
use std::io::Write;

use crate::accumulate::Totals;
use crate::args::Config;
use crate::fields::FieldSelector;
use crate::tally::Tally;

/// Writes totals rows to `out`.
pub(crate) struct Reporter<'c, W: Write> {
    out: W,
    fields: FieldSelector,
    separator: &'c [u8],
    header: bool,
}

impl<'c, W: Write> Reporter<'c, W> {
    pub(crate) fn new(config: &'c Config, out: W) -> Self {
        Reporter {
            out,
            fields: config.fields,
            separator: &config.output_separator,
            header: config.header,
        }
    }

    /// Prints one row: `label: ` (with `--header`), then the total of each
    /// selected column among the first `totals.widest()` raw columns. A row
    /// that reached none of the selected columns is just the label and a
    /// newline; totals that never saw a field print nothing at all.
    pub(crate) fn report<N: Tally>(&mut self, label: Option<&str>, totals: &Totals<N>) -> Result<()> {
        if totals.widest() == 0 {
            return Ok(());
        }
        let columns = self.fields.count_below(totals.widest());
        if let (true, Some(label)) = (self.header, label) {
            write!(self.out, "{label}: ")?;
        }
        for slot in 0..columns {
            if slot > 0 {
                self.out.write_all(self.separator)?;
            }
            totals.get(slot).write_to(&mut self.out)?;
        }
        self.out.write_all(b"\n")?;
        Ok(())
    }

    pub(crate) fn line_total<N: Tally>(&mut self, total: N) -> Result<()> {
        total.write_to(&mut self.out)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    pub(crate) fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
