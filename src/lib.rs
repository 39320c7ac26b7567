//! `total` sums the selected columns of delimited text. The `calculate`
//! function is the kernel of the application: it drives the `Splitter` and
//! `Accumulator` over each operand and hands the totals to the `Reporter`.
//! The `args` module parses the command line, and the `operands` module hides
//! I/O details.
//!
//! Current Limitations:
//! * Only the first 64 fields of a line can be selected, since the selection
//!   is a `u64` bitmask.
//! * Fields are split naively: there's no quoting or escaping of separators.

#![cfg_attr(debug_assertions, allow(dead_code, unused_imports))]
#![deny(unused_must_use)]
#![deny(clippy::all)]
#![allow(clippy::needless_return)]
#![deny(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![deny(missing_docs)]

mod accumulate;
pub mod args;
pub mod calculate;
mod fields;
pub mod help;
pub mod operands;
mod report;
mod split;
mod tally;

pub use crate::fields::{FieldSelector, FieldSpecError};
