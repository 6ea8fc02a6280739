//! Summation of one column of a delimited file.
use crate::common::{Error, Result};
use crate::runtime::{column_names, count_fields, find_column, get_field, strtod, LineReader};

use log::{debug, info, trace, warn};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Which field of each line gets summed.
#[derive(Clone, Debug, PartialEq)]
pub enum Column {
    /// Zero-based field index.
    Index(usize),
    /// Look the index up in the header line.
    Named(String),
}

#[derive(Clone, Debug)]
pub struct SumOpts {
    pub separator: u8,
    pub column: Column,
    /// Skip empty lines rather than failing on them.
    pub skip_blank: bool,
}

impl Default for SumOpts {
    fn default() -> SumOpts {
        SumOpts {
            separator: b',',
            column: Column::Index(3),
            skip_blank: false,
        }
    }
}

/// The running total.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ColumnSum {
    total: f64,
    rows: usize,
}

impl ColumnSum {
    pub fn add(&mut self, v: f64) {
        self.total += v;
        self.rows += 1;
    }
    pub fn total(&self) -> f64 {
        self.total
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
}

/// Sum the selected column of the file at `path`. The file is closed before this returns,
/// whether or not the sum succeeded.
pub fn sum_file(path: &Path, opts: &SumOpts) -> Result<ColumnSum> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    debug!("opened {}", path.display());
    sum_reader(BufReader::new(file), path, opts)
}

/// Sum the selected column of `inner`, skipping its first line. `path` only names the input in
/// error messages.
pub fn sum_reader<R: BufRead>(inner: R, path: &Path, opts: &SumOpts) -> Result<ColumnSum> {
    let sep = opts.separator;
    let mut reader = LineReader::new(inner, path);
    let col = match reader.read_line()? {
        Some((_, header)) => resolve_column(header, sep, &opts.column)?,
        None => match &opts.column {
            // Nothing to read at all; the total is trivially zero.
            Column::Index(_) => return Ok(ColumnSum::default()),
            Column::Named(name) => {
                return err!(1, "input is empty; no header to find column {:?} in", name)
            }
        },
    };

    let mut sum = ColumnSum::default();
    while let Some((line_no, line)) = reader.read_line()? {
        if line.is_empty() {
            if opts.skip_blank {
                warn!("{}: skipping blank line {}", path.display(), line_no);
                continue;
            }
            return err!(
                line_no,
                "line is blank (use --skip-blank to ignore blank lines)"
            );
        }
        let field = match get_field(line, sep, col) {
            Some(field) => field,
            None => {
                return err!(
                    line_no,
                    "expected at least {} fields, found {}",
                    col.saturating_add(1),
                    count_fields(line, sep)
                )
            }
        };
        let v = match strtod(field) {
            Some(v) => v,
            None => {
                return err!(
                    line_no,
                    "field {} is not a number: {:?}",
                    col.saturating_add(1),
                    String::from_utf8_lossy(field)
                )
            }
        };
        trace!("line {}: {}", line_no, v);
        sum.add(v);
    }
    info!(
        "{}: summed {} rows, total {}",
        path.display(),
        sum.rows(),
        sum.total()
    );
    Ok(sum)
}

fn resolve_column(header: &[u8], sep: u8, column: &Column) -> Result<usize> {
    match column {
        Column::Index(ix) => Ok(*ix),
        Column::Named(name) => match find_column(header, sep, name) {
            Some(ix) => {
                debug!("column {:?} is field {}", name, ix);
                Ok(ix)
            }
            None => err!(
                1,
                "no column named {:?}; header has {:?}",
                name,
                column_names(header, sep)
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sum_str(input: &str, opts: &SumOpts) -> Result<ColumnSum> {
        sum_reader(
            Cursor::new(input.as_bytes().to_vec()),
            Path::new("test.csv"),
            opts,
        )
    }

    fn total(input: &str) -> f64 {
        sum_str(input, &SumOpts::default()).unwrap().total()
    }

    fn parse_error_line(res: Result<ColumnSum>) -> usize {
        match res {
            Err(Error::Parse { line, .. }) => line,
            Err(e) => panic!("expected a parse error, got {}", e),
            Ok(s) => panic!("expected a parse error, got total {}", s.total()),
        }
    }

    #[test]
    fn header_only_is_zero() {
        assert_eq!(total("a,b,c,sales\n"), 0.0);
        assert_eq!(total("a,b,c,sales"), 0.0);
        assert_eq!(total(""), 0.0);
    }

    #[test]
    fn sums_fourth_column() {
        let s = sum_str("a,b,c,sales\nx,y,z,10.5\np,q,r,4.5\n", &SumOpts::default()).unwrap();
        assert_eq!(s.total(), 15.0);
        assert_eq!(s.rows(), 2);
        // Extra fields past the target are ignored, whitespace around the value is not an error.
        assert_eq!(total("h\n1,2,3, 7 ,ignored\n1,2,3,\t3\r\n"), 10.0);
    }

    #[test]
    fn header_contents_are_ignored() {
        assert_eq!(total("not,a,number,header\n1,1,1,2\n"), 2.0);
        assert_eq!(total("x\n1,1,1,2\n"), 2.0);
    }

    #[test]
    fn order_does_not_matter() {
        let vals = [230.1, 44.5, 17.2, 151.5, 180.8, 8.7, 57.5, 120.2, 8.6, 199.8];
        let mut fwd = String::from("id,tv,radio,sales\n");
        let mut rev = fwd.clone();
        for v in vals.iter() {
            fwd.push_str(&format!("1,2,3,{}\n", v));
        }
        for v in vals.iter().rev() {
            rev.push_str(&format!("1,2,3,{}\n", v));
        }
        let expected: f64 = vals.iter().sum();
        assert!((total(&fwd) - expected).abs() < 1e-9);
        assert!((total(&rev) - expected).abs() < 1e-9);
    }

    #[test]
    fn malformed_rows_fail_fast() {
        let opts = SumOpts::default();
        assert_eq!(
            parse_error_line(sum_str("h\n1,2,3,4\n1,2,3,abc\n1,2,3,4\n", &opts)),
            3
        );
        assert_eq!(parse_error_line(sum_str("h\n1,2,3,4\n1,2\n", &opts)), 3);
        assert_eq!(parse_error_line(sum_str("h\n1,2,3,\n", &opts)), 2);
        let err = sum_str("h\n1,2\n", &opts).unwrap_err();
        assert_eq!(err.to_string(), "line 2: expected at least 4 fields, found 2");
        let err = sum_str("h\n1,2,3,ten\n", &opts).unwrap_err();
        assert_eq!(err.to_string(), "line 2: field 4 is not a number: \"ten\"");
    }

    #[test]
    fn blank_lines() {
        let input = "h\n1,2,3,4\n\n1,2,3,5\n\r\n";
        assert_eq!(
            parse_error_line(sum_str(input, &SumOpts::default())),
            3
        );
        let opts = SumOpts {
            skip_blank: true,
            ..SumOpts::default()
        };
        assert_eq!(sum_str(input, &opts).unwrap().total(), 9.0);
        // A line of spaces is not blank; it is a row with a single field.
        assert_eq!(parse_error_line(sum_str("h\n  \n", &opts)), 2);
    }

    #[test]
    fn named_and_indexed_columns() {
        let input = ",TV Ad Budget ($),Radio Ad Budget ($),Newspaper Ad Budget ($),Sales ($)\n\
                     1,230.1,37.8,69.2,22.1\n\
                     2,44.5,39.3,45.1,10.4\n";
        let named = SumOpts {
            column: Column::Named("Sales ($)".into()),
            ..SumOpts::default()
        };
        assert!((sum_str(input, &named).unwrap().total() - 32.5).abs() < 1e-9);
        let indexed = SumOpts {
            column: Column::Index(1),
            ..SumOpts::default()
        };
        assert!((sum_str(input, &indexed).unwrap().total() - 274.6).abs() < 1e-9);

        let missing = SumOpts {
            column: Column::Named("Profit".into()),
            ..SumOpts::default()
        };
        assert_eq!(parse_error_line(sum_str(input, &missing)), 1);
        assert_eq!(parse_error_line(sum_str("", &missing)), 1);
    }

    #[test]
    fn carriage_return_line_endings() {
        let s = sum_str("a,b,c,sales\rx,y,z,10.5\rp,q,r,4.5\r", &SumOpts::default()).unwrap();
        assert_eq!(s.total(), 15.0);
        assert_eq!(s.rows(), 2);
        assert_eq!(total("a,b,c,sales\rx,y,z,10.5\r\np,q,r,4.5\n"), 15.0);
    }

    #[test]
    fn huge_column_index() {
        let opts = SumOpts {
            column: Column::Index(usize::MAX),
            ..SumOpts::default()
        };
        let err = sum_str("h\n1,2\n", &opts).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("line 2: expected at least {} fields, found 2", usize::MAX)
        );
    }

    #[test]
    fn other_separators() {
        let opts = SumOpts {
            separator: b'\t',
            ..SumOpts::default()
        };
        assert_eq!(sum_str("a\tb\tc\td\n1\t2\t3\t4.25\n", &opts).unwrap().total(), 4.25);
        assert_eq!(parse_error_line(sum_str("h\n1,2,3,4\n", &opts)), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = std::env::temp_dir().join("colsum-definitely-missing-dir");
        match sum_file(&dir.join("nope.csv"), &SumOpts::default()) {
            Err(Error::Io { path, .. }) => assert!(path.ends_with("nope.csv")),
            Err(e) => panic!("expected an io error, got {}", e),
            Ok(_) => panic!("expected an io error"),
        }
    }
}
