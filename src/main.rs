//! colsum sums one numeric column of a delimited text file, skipping the header line, and prints
//! `Total Sales: $<total>`.
#[macro_use]
pub mod common;
pub mod report;
pub mod runtime;
pub mod sum;

use clap::Parser;
use log::debug;

use std::io;
use std::path::PathBuf;
use std::process;

use sum::{Column, SumOpts};

const DEFAULT_INPUT: &str = "advertising_budget_and_sales.csv";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input file. Its first line is a header and is skipped.
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Field separator: a single ASCII character, or `\t` for tabs.
    #[arg(short = 'F', long = "field-separator", default_value = ",", value_parser = parse_separator)]
    separator: u8,

    /// Zero-based index of the field to sum.
    #[arg(short, long, default_value_t = 3)]
    column: usize,

    /// Sum the field with this header name instead of a fixed index.
    #[arg(short, long, conflicts_with = "column")]
    field: Option<String>,

    /// Skip blank lines instead of failing on them.
    #[arg(long)]
    skip_blank: bool,

    /// Print the total with this many decimal places.
    #[arg(long)]
    precision: Option<usize>,
}

impl Cli {
    fn sum_opts(&self) -> SumOpts {
        SumOpts {
            separator: self.separator,
            column: match &self.field {
                Some(name) => Column::Named(name.clone()),
                None => Column::Index(self.column),
            },
            skip_blank: self.skip_blank,
        }
    }
}

fn parse_separator(s: &str) -> Result<u8, String> {
    match s {
        "\\t" | "tab" => Ok(b'\t'),
        _ => match s.as_bytes() {
            [b] if b.is_ascii() && *b != b'\n' => Ok(*b),
            _ => Err(format!(
                "separator must be a single ASCII character other than newline, got {:?}",
                s
            )),
        },
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let total = match sum::sum_file(&cli.input, &cli.sum_opts()) {
        Ok(sum) => sum.total(),
        Err(e) => {
            debug!("{:?}", e);
            eprintln!("colsum: {}", e);
            process::exit(1);
        }
    };
    let stdout = io::stdout();
    if let Err(e) = report::write_total(&mut stdout.lock(), total, cli.precision) {
        eprintln!("colsum: failed to write output: {}", e);
        process::exit(1);
    }
}
