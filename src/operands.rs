//! Provides `Operands`, an iterator that opens the command line's input files
//! one at a time, in order, and yields each as a `NextOperand`. With no files
//! the only operand is standard input.
use anyhow::Result;
use bstr::io::BufReadExt;
use encoding_rs_io::{DecodeReaderBytes, DecodeReaderBytesBuilder};
use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::calculate::Operand;

/// The label standard input is reported under.
pub const STDIN_LABEL: &str = "<stdin>";

/// A named input that couldn't be opened. `main` checks for this type to
/// decide whether `--quiet` applies.
#[derive(Debug, Error)]
#[error("Unable to open file `{path}'")]
pub struct OpenError {
    path: String,
    #[source]
    source: io::Error,
}

enum Input {
    Stdin,
    Path(PathBuf),
}

/// Files are opened only when the iterator reaches them, so a file is never
/// opened before every earlier file has been read and closed.
pub struct Operands {
    inputs: std::vec::IntoIter<Input>,
}

impl From<Vec<PathBuf>> for Operands {
    fn from(files: Vec<PathBuf>) -> Self {
        let inputs: Vec<Input> = if files.is_empty() {
            vec![Input::Stdin]
        } else {
            files
                .into_iter()
                .map(|path| if path.as_os_str() == "-" { Input::Stdin } else { Input::Path(path) })
                .collect()
        };
        Operands { inputs: inputs.into_iter() }
    }
}

impl Iterator for Operands {
    type Item = Result<NextOperand>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inputs.next().map(|input| match input {
            Input::Stdin => Ok(NextOperand::new(STDIN_LABEL.to_string(), Box::new(io::stdin()))),
            Input::Path(path) => reader_for(&path),
        })
    }
}

fn reader_for(path: &Path) -> Result<NextOperand> {
    let path_display = path.display().to_string();
    match File::open(path) {
        Ok(file) => Ok(NextOperand::new(path_display, Box::new(file))),
        Err(source) => Err(OpenError { path: path_display, source }.into()),
    }
}

/// `NextOperand` is the `Item` type for the `Operands` iterator. The `reader`
/// field is a buffered reader that transcodes UTF-16 (recognized by its Byte
/// Order Mark) to UTF-8; `label` names the input in reports and messages.
pub struct NextOperand {
    label: String,
    reader: BufReader<DecodeReaderBytes<Box<dyn Read>, Vec<u8>>>,
}

impl NextOperand {
    fn new(label: String, source: Box<dyn Read>) -> Self {
        let reader = BufReader::with_capacity(
            32 * 1024,
            DecodeReaderBytesBuilder::new()
                .bom_sniffing(true) // Look at the BOM to detect UTF-16 files and convert to UTF-8
                .strip_bom(true) // Remove the BOM before sending data to us
                .utf8_passthru(true) // Don't enforce UTF-8 (BOM or no BOM)
                .build(source),
        );
        NextOperand { label, reader }
    }
}

impl Operand for NextOperand {
    fn label(&self) -> &str {
        &self.label
    }

    /// A convenience wrapper around `bstr::for_byte_line`. The underlying
    /// file is closed when this returns, whatever the outcome.
    fn for_byte_line(self, mut for_each_line: impl FnMut(&[u8])) -> Result<()> {
        let NextOperand { label, mut reader } = self;
        reader
            .for_byte_line(|line| {
                for_each_line(line);
                Ok(true)
            })
            .map_err(|e| anyhow::Error::new(e).context(format!("Error reading {label}")))
    }
}
