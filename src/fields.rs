//! The `FieldSelector` type: which columns of a record take part in the totals.
//!
//! A field list is a comma-separated list of terms, each a single 1-based
//! column number `N`, a closed range `A-B`, or a range open at either end
//! (`A-`, `-B`). Columns are held in a `u64` bitmask, so only the first
//! `CAPACITY` columns of a record can ever be selected.
use std::str::FromStr;
use thiserror::Error;

/// The number of columns a `FieldSelector` can represent.
pub(crate) const CAPACITY: usize = u64::BITS as usize;
const LAST: usize = CAPACITY - 1;

/// A set of 0-based column indices, built once from the `-f` option.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FieldSelector(u64);

impl Default for FieldSelector {
    /// Every column is selected, which for any real record means "field 1
    /// to the end of the line".
    fn default() -> Self {
        FieldSelector(u64::MAX)
    }
}

impl FieldSelector {
    fn none() -> Self {
        FieldSelector(0)
    }

    /// Is the 0-based column `index` selected?
    #[must_use]
    pub fn includes(self, index: usize) -> bool {
        index < CAPACITY && self.0 & (1 << index) != 0
    }

    /// How many of the columns `0..width` are selected.
    #[must_use]
    pub fn count_below(self, width: usize) -> usize {
        (0..width.min(CAPACITY)).filter(|&index| self.includes(index)).count()
    }

    fn insert(&mut self, index: usize) {
        if index < CAPACITY {
            self.0 |= 1 << index;
        }
    }

    // Endpoints may arrive in either order; both are clamped to the capacity.
    fn insert_range(&mut self, from: usize, to: usize) {
        let (low, high) = if from <= to { (from, to) } else { (to, from) };
        for index in low..=high.min(LAST) {
            self.insert(index);
        }
    }
}

/// The error for a field list containing something other than digits, `-`
/// and `,`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldSpecError {
    /// `character` was found at (1-based) `position`
    #[error("unexpected `{character}' at position {position} of the field list (expected digits, `-' or `,')")]
    UnexpectedCharacter {
        /// The offending character
        character: char,
        /// Its 1-based character position
        position: usize,
    },
}

impl FromStr for FieldSelector {
    type Err = FieldSpecError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut selector = FieldSelector::none();
        let mut term = Term::default();
        let mut chars = spec.char_indices().peekable();

        while let Some((position, character)) = chars.next() {
            match character {
                '0'..='9' => {
                    let mut number = u64::from(character.to_digit(10).unwrap_or(0));
                    while let Some(&(_, next)) = chars.peek() {
                        let Some(digit) = next.to_digit(10) else { break };
                        number = number.saturating_mul(10).saturating_add(u64::from(digit));
                        chars.next();
                    }
                    term.number(&mut selector, to_index(number));
                }
                '-' => term.in_range = true,
                ',' => term.finish(&mut selector),
                _ => {
                    let position = spec[..position].chars().count() + 1;
                    return Err(FieldSpecError::UnexpectedCharacter { character, position });
                }
            }
        }
        term.finish(&mut selector);
        Ok(selector)
    }
}

/// User input is 1-based; `0` is treated like `1`.
fn to_index(number: u64) -> usize {
    usize::try_from(number.saturating_sub(1)).unwrap_or(usize::MAX)
}

/// The part of a term seen so far: its start (if any), and whether a `-`
/// has been seen since.
#[derive(Default)]
struct Term {
    start: Option<usize>,
    in_range: bool,
}

impl Term {
    fn number(&mut self, selector: &mut FieldSelector, index: usize) {
        if self.in_range {
            selector.insert_range(self.start.unwrap_or(0), index);
            *self = Term::default();
        } else {
            self.start = Some(index);
        }
    }

    fn finish(&mut self, selector: &mut FieldSelector) {
        if self.in_range {
            selector.insert_range(self.start.unwrap_or(0), LAST);
        } else if let Some(index) = self.start {
            selector.insert(index);
        }
        *self = Term::default();
    }
}
