//! The usage text printed by `total --help`, and the version string printed
//! by `total --version`. The text lives in `help.txt` and is wrapped to fit
//! the terminal.
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use std::io::Write;
use terminal_size::{terminal_size, Width};
use textwrap::{wrap, Options};

const NAME: &str = "total";

/// Descriptions narrower than this go on the line below their flags.
const MIN_DESCRIPTION_WIDTH: usize = 24;
const OPTION_INDENT: &str = "  ";
const DESCRIPTION_INDENT: &str = "        ";

static WIDTH: Lazy<usize> = Lazy::new(|| {
    if let Some((Width(columns), _)) = terminal_size() {
        return usize::from(columns);
    }
    std::env::var("COLUMNS").ok().and_then(|c| c.parse().ok()).unwrap_or(100)
});

/// A block of `help.txt`, separated from the next by a blank line.
#[derive(Debug, PartialEq)]
enum Block<'a> {
    Usage(&'a str),
    Text(&'a str),
    Options { title: &'a str, options: Vec<Flag<'a>> },
    Blank,
}

#[derive(Debug, PartialEq)]
struct Flag<'a> {
    flags: &'a str,
    description: &'a str,
}

/// `total` and its version number.
#[must_use]
pub fn version() -> String {
    format!("{NAME} {}", std::env!("CARGO_PKG_VERSION"))
}

/// Prints the usage text to `out` (standard error, for `total --help`).
pub fn print(out: &mut dyn Write) -> Result<()> {
    render(out, *WIDTH).context("failed printing help")
}

fn render(out: &mut dyn Write, width: usize) -> std::io::Result<()> {
    for block in blocks(include_str!("help.txt")) {
        match block {
            Block::Usage(args) => writeln!(out, "Usage: {NAME} {args}")?,
            Block::Text(text) => {
                for line in wrap(text, width) {
                    writeln!(out, "{line}")?;
                }
            }
            Block::Options { title, options } => {
                writeln!(out, "{title}")?;
                for line in option_lines(&options, width) {
                    writeln!(out, "{line}")?;
                }
            }
            Block::Blank => writeln!(out)?,
        }
    }
    out.flush()
}

fn blocks(text: &str) -> Vec<Block> {
    let mut result = Vec::new();
    let mut lines = text.lines().peekable();
    while let Some(line) = lines.next() {
        if line.trim().is_empty() {
            result.push(Block::Blank);
        } else if let Some(usage) = line.strip_prefix("Usage: ") {
            let args = usage.split_once(' ').map_or("", |(_, args)| args);
            result.push(Block::Usage(args));
        } else if line.ends_with(':') {
            let mut options = Vec::new();
            while let Some(next) = lines.next_if(|l| l.starts_with(OPTION_INDENT)) {
                let next = next.trim();
                let (flags, description) = next.split_once("  ").unwrap_or((next, ""));
                options.push(Flag { flags, description: description.trim_start() });
            }
            result.push(Block::Options { title: line, options });
        } else {
            result.push(Block::Text(line));
        }
    }
    result
}

// Descriptions share one column to the right of the widest flags when that
// leaves them enough room; otherwise each goes on its own indented lines.
fn option_lines(options: &[Flag], width: usize) -> Vec<String> {
    let flags_width = options.iter().map(|o| o.flags.len()).max().unwrap_or(0);
    let column = OPTION_INDENT.len() + flags_width + 2;
    let mut lines = Vec::new();
    if column + MIN_DESCRIPTION_WIDTH <= width {
        let hanging = " ".repeat(column);
        for option in options {
            let first = format!("{OPTION_INDENT}{:<flags_width$}  ", option.flags);
            let wrap_options = Options::new(width).initial_indent(&first).subsequent_indent(&hanging);
            lines.extend(wrap(option.description, wrap_options).into_iter().map(String::from));
        }
    } else {
        let wrap_options = Options::new(width)
            .initial_indent(DESCRIPTION_INDENT)
            .subsequent_indent(DESCRIPTION_INDENT);
        for option in options {
            lines.push(format!("{OPTION_INDENT}{}", option.flags));
            lines.extend(wrap(option.description, &wrap_options).into_iter().map(String::from));
        }
    }
    lines
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;

    fn rendered(width: usize) -> String {
        let mut out = Vec::new();
        render(&mut out, width).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn version_names_the_program() {
        assert!(version().starts_with("total "));
        assert!(version().ends_with(std::env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn help_text_has_a_usage_line_and_one_option_list() {
        let help = blocks(include_str!("help.txt"));
        assert_eq!(help[0], Block::Usage("[OPTIONS] [FILE...]"));
        let lists: Vec<&Vec<Flag>> = help
            .iter()
            .filter_map(|block| match block {
                Block::Options { options, .. } => Some(options),
                _ => None,
            })
            .collect();
        assert_eq!(lists.len(), 1);
        assert!(lists[0].contains(&Flag {
            flags: "-f, --field <LIST>",
            description: "Total only the fields in LIST (default \"1-\")",
        }));
        assert!(lists[0].iter().all(|o| !o.description.is_empty()));
    }

    #[test]
    fn every_option_is_mentioned() {
        let mut out = Vec::new();
        print(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Usage: total [OPTIONS]"));
        for option in [
            "--separator",
            "--output-separator",
            "--field",
            "--totals-only",
            "--horizontal",
            "--doubles",
            "--header",
            "--quiet",
            "--keep-going",
            "--help",
            "--version",
        ] {
            assert!(text.contains(option), "{option} is missing");
        }
    }

    #[test]
    fn wide_terminals_put_descriptions_beside_their_flags() {
        let text = rendered(120);
        let line = text.lines().find(|l| l.contains("--totals-only")).unwrap();
        assert!(line.ends_with("Print only the grand totals"), "{line}");
        assert!(text.lines().all(|l| l.len() <= 120));
    }

    #[test]
    fn narrow_terminals_put_descriptions_below_their_flags() {
        let text = rendered(40);
        let lines: Vec<&str> = text.lines().collect();
        let at = lines.iter().position(|l| l.trim() == "-t, --totals-only").unwrap();
        assert_eq!(lines[at + 1], format!("{DESCRIPTION_INDENT}Print only the grand totals"));
    }
}
