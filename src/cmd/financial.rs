//! Financial command - income/expense summary for a property

use crate::analytics::{CategorySummary, MonthlySummary};
use crate::cmd::{format_money, format_pct, print_json, read_portfolio};
use crate::engine;
use chrono::NaiveDate;
use clap::Args;
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct FinancialCommand {
    /// Portfolio snapshot JSON file (or - for stdin)
    #[arg(short, long)]
    file: PathBuf,

    /// Property identifier
    #[arg(short, long)]
    property: String,

    /// Start of the reporting range (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// End of the reporting range (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// Output the monthly summary as CSV
    #[arg(long)]
    csv: bool,
}

impl FinancialCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let portfolio = read_portfolio(&self.file)?;
        let report = engine::financial_report(&portfolio, &self.property, self.from, self.to)?;

        if self.json {
            return print_json(&report);
        }
        if self.csv {
            return write_monthly_csv(&report.monthly_summary);
        }

        println!();
        println!("FINANCIAL REPORT ({})", self.property);
        println!();
        println!("  Income: {}", format_money(report.total_income));
        println!("  Expenses: {}", format_money(report.total_expenses));
        println!("  NOI: {}", format_money(report.net_operating_income));
        println!("  Expense Ratio: {}", format_pct(report.expense_ratio));
        println!();

        if !report.income_by_category.is_empty() {
            println!("INCOME BY CATEGORY");
            print_category_table(&report.income_by_category);
        }
        if !report.expenses_by_category.is_empty() {
            println!("EXPENSES BY CATEGORY");
            print_category_table(&report.expenses_by_category);
        }
        if !report.monthly_summary.is_empty() {
            println!("MONTHLY SUMMARY");
            print_monthly_table(&report.monthly_summary);
        }
        Ok(())
    }
}

/// Row for the category breakdown table
#[derive(Debug, Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Share")]
    percentage: String,
}

/// Row for the monthly summary table and CSV output
#[derive(Debug, Tabled, serde::Serialize)]
pub struct MonthRow {
    #[tabled(rename = "Month")]
    pub month: String,
    #[tabled(rename = "Income")]
    pub income: String,
    #[tabled(rename = "Expenses")]
    pub expenses: String,
    #[tabled(rename = "NOI")]
    pub net_operating_income: String,
    #[tabled(rename = "Cash Flow")]
    pub cash_flow: String,
}

impl From<&MonthlySummary> for MonthRow {
    fn from(row: &MonthlySummary) -> Self {
        MonthRow {
            month: row.month.to_string(),
            income: format!("{:.2}", row.income),
            expenses: format!("{:.2}", row.expenses),
            net_operating_income: format!("{:.2}", row.net_operating_income),
            cash_flow: format!("{:.2}", row.cash_flow),
        }
    }
}

fn print_category_table(categories: &[CategorySummary]) {
    let rows: Vec<CategoryRow> = categories
        .iter()
        .map(|c| CategoryRow {
            name: c.name.clone(),
            amount: format_money(c.amount),
            percentage: format_pct(c.percentage),
        })
        .collect();
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!();
}

pub fn print_monthly_table(rows: &[MonthlySummary]) {
    let rows: Vec<MonthRow> = rows.iter().map(MonthRow::from).collect();
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!();
}

pub fn write_monthly_csv(rows: &[MonthlySummary]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout());
    for row in rows {
        wtr.serialize(MonthRow::from(row))?;
    }
    wtr.flush()?;
    Ok(())
}
