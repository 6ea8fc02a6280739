//! Rendering of the `Total Sales: $<total>` line.
use std::io::{self, Write};

pub const PREFIX: &str = "Total Sales: $";

/// Render `total` the way it is reported. Without a precision we print the shortest string that
/// round-trips, which always includes a decimal point for finite values ("15.0", not "15").
/// Totals ryu would put in exponent form are spelled out in plain decimal instead.
pub fn format_total(total: f64, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{:.*}", p, total),
        None if total.is_finite() => {
            let mut buffer = ryu::Buffer::new();
            let short = buffer.format_finite(total);
            if !short.contains('e') {
                return short.into();
            }
            let mut long = format!("{}", total);
            if !long.contains('.') {
                long.push_str(".0");
            }
            long
        }
        None => format!("{}", total),
    }
}

pub fn write_total(w: &mut impl Write, total: f64, precision: Option<usize>) -> io::Result<()> {
    writeln!(w, "{}{}", PREFIX, format_total(total, precision))?;
    w.flush()
}
