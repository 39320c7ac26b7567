//! Splits a line into fields on an exact separator.
use memchr::memchr;
use memchr::memmem::Finder;

/// A `Splitter` finds its separator with `memchr` when the separator is a
/// single byte, and with a precompiled `memmem::Finder` otherwise.
pub(crate) enum Splitter {
    Byte(u8),
    Bytes(Finder<'static>),
}

impl Splitter {
    /// The command line never passes an empty `separator`; if one arrives
    /// anyway, every line is a single field.
    pub(crate) fn new(separator: &[u8]) -> Self {
        match separator {
            [byte] => Splitter::Byte(*byte),
            _ => Splitter::Bytes(Finder::new(separator).into_owned()),
        }
    }

    fn width(&self) -> usize {
        match self {
            Splitter::Byte(_) => 1,
            Splitter::Bytes(finder) => finder.needle().len(),
        }
    }

    fn find(&self, haystack: &[u8]) -> Option<usize> {
        match self {
            Splitter::Byte(byte) => memchr(*byte, haystack),
            Splitter::Bytes(finder) if finder.needle().is_empty() => None,
            Splitter::Bytes(finder) => finder.find(haystack),
        }
    }

    /// Returns an iterator over the fields of `line`. The fields borrow from
    /// `line`, so they can't outlive it.
    pub(crate) fn split<'s, 'l>(&'s self, line: &'l [u8]) -> Fields<'s, 'l> {
        Fields { splitter: self, rest: Some(line) }
    }
}

/// The `Fields` iterator yields each separator-terminated field, then the
/// non-empty remainder of the line, if any.
pub(crate) struct Fields<'s, 'l> {
    splitter: &'s Splitter,
    rest: Option<&'l [u8]>,
}

impl<'l> Iterator for Fields<'_, 'l> {
    type Item = &'l [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest.take()?;
        if rest.is_empty() {
            return None;
        }
        match self.splitter.find(rest) {
            Some(end) => {
                self.rest = Some(&rest[end + self.splitter.width()..]);
                Some(&rest[..end])
            }
            None => Some(rest),
        }
    }
}
