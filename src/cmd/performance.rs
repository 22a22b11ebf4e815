//! Performance command - lifetime investment metrics per property

use crate::analytics::PropertyPerformance;
use crate::cmd::{format_money, format_pct, print_json, read_portfolio};
use crate::engine;
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct PerformanceCommand {
    /// Portfolio snapshot JSON file (or - for stdin)
    #[arg(short, long)]
    file: PathBuf,

    /// Property identifier; omit to report the whole portfolio
    #[arg(short, long)]
    property: Option<String>,

    /// Valuation date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl PerformanceCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let as_of = self.as_of.unwrap_or_else(|| chrono::Utc::now().date_naive());
        let portfolio = read_portfolio(&self.file)?;

        match &self.property {
            Some(property_id) => {
                let perf = engine::property_performance(&portfolio, property_id, as_of)?;
                if self.json {
                    print_json(&perf)
                } else {
                    print_single(&perf);
                    Ok(())
                }
            }
            None => {
                let snapshots = engine::portfolio_performance(&portfolio, as_of);
                if self.json {
                    print_json(&snapshots)
                } else {
                    print_portfolio_table(&snapshots);
                    Ok(())
                }
            }
        }
    }
}

fn print_single(perf: &PropertyPerformance) {
    println!();
    println!("PERFORMANCE ({})", perf.property_name);
    println!();
    println!("  Purchase Price: {}", format_money(perf.purchase_price));
    println!("  Current Value: {}", format_money(perf.current_value));
    println!(
        "  Appreciation: {} ({})",
        format_money(perf.appreciation),
        format_pct(perf.appreciation_percentage)
    );
    println!("  Annualized Appreciation: {}", format_pct(perf.annualized_appreciation));
    println!("  Years Owned: {:.1}", perf.years_owned);
    println!();
    println!("  Total Cash Invested: {}", format_money(perf.total_cash_invested));
    println!("  Annual Cash Flow: {}", format_money(perf.annual_cash_flow));
    println!("  Cash-on-Cash: {}", format_pct(perf.cash_on_cash_return));
    println!("  Cap Rate: {}", format_pct(perf.cap_rate));
    println!();
    println!(
        "  Total Return: {} ({})",
        format_money(perf.total_return),
        format_pct(perf.total_return_percentage)
    );
    println!("  Annualized Return: {}", format_pct(perf.annualized_return));
    println!("  Expense Ratio: {}", format_pct(perf.expense_ratio));
    println!("  Occupancy: {}", format_pct(perf.occupancy_rate));
    println!();
}

/// Row for the portfolio-wide performance table
#[derive(Debug, Tabled)]
struct PerformanceRow {
    #[tabled(rename = "Property")]
    name: String,
    #[tabled(rename = "Value")]
    current_value: String,
    #[tabled(rename = "Appreciation")]
    appreciation: String,
    #[tabled(rename = "Cash Flow/yr")]
    annual_cash_flow: String,
    #[tabled(rename = "CoC")]
    cash_on_cash: String,
    #[tabled(rename = "Cap Rate")]
    cap_rate: String,
    #[tabled(rename = "Annualized")]
    annualized_return: String,
    #[tabled(rename = "Occupancy")]
    occupancy: String,
}

fn print_portfolio_table(snapshots: &[PropertyPerformance]) {
    if snapshots.is_empty() {
        println!("No properties in portfolio");
        return;
    }
    let rows: Vec<PerformanceRow> = snapshots
        .iter()
        .map(|p| PerformanceRow {
            name: p.property_name.clone(),
            current_value: format_money(p.current_value),
            appreciation: format_pct(p.appreciation_percentage),
            annual_cash_flow: format_money(p.annual_cash_flow),
            cash_on_cash: format_pct(p.cash_on_cash_return),
            cap_rate: format_pct(p.cap_rate),
            annualized_return: format_pct(p.annualized_return),
            occupancy: format_pct(p.occupancy_rate),
        })
        .collect();
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
}
