pub mod cashflow;
pub mod financial;
pub mod performance;
pub mod schema;
pub mod tax;

use crate::portfolio::{read_portfolio_json, Portfolio};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read a portfolio snapshot JSON file (or stdin with "-")
pub fn read_portfolio(path: &Path) -> anyhow::Result<Portfolio> {
    if path.as_os_str() == "-" {
        read_from_stdin()
    } else {
        let file = File::open(path)?;
        read_portfolio_json(BufReader::new(file))
    }
}

fn read_from_stdin() -> anyhow::Result<Portfolio> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    read_portfolio_json(io::Cursor::new(buffer))
}

pub(crate) fn format_money(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}

pub(crate) fn format_pct(value: Decimal) -> String {
    format!("{:.2}%", value)
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
