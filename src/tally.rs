use anyhow::Result;
use bstr::ByteSlice;
use std::fmt::Debug;

/// A `Tally` is the number type totals are kept in: `i64` by default, `f64`
/// with `--doubles`. Conversion from field text never fails; text that isn't
/// a number counts as zero.
pub(crate) trait Tally: Copy + Default + PartialEq + Debug {
    fn parse(field: &[u8]) -> Self;
    fn add(&mut self, other: Self);
    fn write_to(self, out: &mut impl std::io::Write) -> Result<()>;
}

impl Tally for i64 {
    /// Leading whitespace and a sign, then as many decimal digits as there
    /// are. Anything after the digits is ignored; overflow saturates.
    fn parse(field: &[u8]) -> Self {
        let (negative, digits) = signed(field.trim_start());
        let mut value: i64 = 0;
        for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
            let digit = i64::from(b - b'0');
            value = if negative {
                value.saturating_mul(10).saturating_sub(digit)
            } else {
                value.saturating_mul(10).saturating_add(digit)
            };
        }
        value
    }
    fn add(&mut self, other: Self) {
        *self = self.wrapping_add(other);
    }
    fn write_to(self, out: &mut impl std::io::Write) -> Result<()> {
        write!(out, "{self}")?;
        Ok(())
    }
}

impl Tally for f64 {
    /// The longest prefix (after leading whitespace) that looks like
    /// `[sign] digits [. digits] [e [sign] digits]`, or a signed `inf`,
    /// `infinity` or `nan` in any case. Hex floats aren't recognized.
    fn parse(field: &[u8]) -> Self {
        let field = field.trim_start();
        let end = float_prefix_len(field);
        std::str::from_utf8(&field[..end]).ok().and_then(|s| s.parse().ok()).unwrap_or(0.0)
    }
    fn add(&mut self, other: Self) {
        *self += other;
    }
    fn write_to(self, out: &mut impl std::io::Write) -> Result<()> {
        write!(out, "{self:.6}")?;
        Ok(())
    }
}

fn signed(field: &[u8]) -> (bool, &[u8]) {
    match field.first() {
        Some(b'-') => (true, &field[1..]),
        Some(b'+') => (false, &field[1..]),
        _ => (false, field),
    }
}

fn digits_at(field: &[u8], start: usize) -> usize {
    field[start..].iter().take_while(|b| b.is_ascii_digit()).count()
}

// Longest first, so `infinity` isn't cut short at `inf`.
const NON_FINITE: [&[u8]; 3] = [b"infinity", b"inf", b"nan"];

// Returns 0 when there's no mantissa digit at all.
fn float_prefix_len(field: &[u8]) -> usize {
    let mut end = usize::from(matches!(field.first(), Some(b'-' | b'+')));
    for word in NON_FINITE {
        let rest = &field[end..];
        if rest.len() >= word.len() && rest[..word.len()].eq_ignore_ascii_case(word) {
            return end + word.len();
        }
    }
    let whole = digits_at(field, end);
    end += whole;
    let mut fraction = 0;
    if field.get(end) == Some(&b'.') {
        fraction = digits_at(field, end + 1);
        if whole + fraction > 0 {
            end += 1 + fraction;
        }
    }
    if whole + fraction == 0 {
        return 0;
    }
    if matches!(field.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(field.get(end + 1), Some(b'-' | b'+')));
        let exponent = digits_at(field, end + 1 + sign);
        if exponent > 0 {
            end += 1 + sign + exponent;
        }
    }
    end
}
