//! Running totals. In vertical mode an `Accumulator` keeps one total per
//! selected column, both for the current file and for the whole run; in
//! horizontal mode `line_total` sums one record and keeps nothing.
use crate::fields::FieldSelector;
use crate::tally::Tally;

/// One running total per *selected* field position: slot 0 holds the sum of
/// the first selected field of each record, whatever its raw column.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct Totals<N: Tally> {
    sums: Vec<N>,
    widest: usize,
}

impl<N: Tally> Totals<N> {
    fn add(&mut self, slot: usize, value: N) {
        if slot >= self.sums.len() {
            self.sums.resize(slot + 1, N::default());
        }
        self.sums[slot].add(value);
    }

    fn saw_width(&mut self, width: usize) {
        self.widest = self.widest.max(width);
    }

    /// The largest number of raw fields in any record added so far.
    pub(crate) fn widest(&self) -> usize {
        self.widest
    }

    /// The total for `slot`, zero if no record reached it.
    pub(crate) fn get(&self, slot: usize) -> N {
        self.sums.get(slot).copied().unwrap_or_default()
    }
}

pub(crate) struct Accumulator<N: Tally> {
    fields: FieldSelector,
    file: Totals<N>,
    grand: Totals<N>,
}

impl<N: Tally> Accumulator<N> {
    pub(crate) fn new(fields: FieldSelector) -> Self {
        Accumulator { fields, file: Totals::default(), grand: Totals::default() }
    }

    /// Clears the per-file totals. The grand totals are never cleared.
    pub(crate) fn next_file(&mut self) {
        self.file = Totals::default();
    }

    pub(crate) fn add_record<'l>(&mut self, record: impl IntoIterator<Item = &'l [u8]>) {
        let mut slot = 0;
        let mut width = 0;
        for (index, field) in record.into_iter().enumerate() {
            width = index + 1;
            if self.fields.includes(index) {
                let value = N::parse(field);
                self.file.add(slot, value);
                self.grand.add(slot, value);
                slot += 1;
            }
        }
        self.file.saw_width(width);
        self.grand.saw_width(width);
    }

    pub(crate) fn file_totals(&self) -> &Totals<N> {
        &self.file
    }

    pub(crate) fn grand_totals(&self) -> &Totals<N> {
        &self.grand
    }
}

/// The horizontal total of one record: the sum of its selected fields.
pub(crate) fn line_total<'l, N: Tally>(
    fields: FieldSelector,
    record: impl IntoIterator<Item = &'l [u8]>,
) -> N {
    let mut total = N::default();
    for (_, field) in record.into_iter().enumerate().filter(|(index, _)| fields.includes(*index)) {
        total.add(N::parse(field));
    }
    total
}
