//! Cashflow command - monthly cash-flow statement for a property

use crate::analytics::Month;
use crate::cmd::financial::{print_monthly_table, write_monthly_csv};
use crate::cmd::{format_money, format_pct, print_json, read_portfolio};
use crate::engine;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CashflowCommand {
    /// Portfolio snapshot JSON file (or - for stdin)
    #[arg(short, long)]
    file: PathBuf,

    /// Property identifier
    #[arg(short, long)]
    property: String,

    /// Calendar month to report (YYYY-MM, defaults to the current month)
    #[arg(short, long)]
    month: Option<String>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// Output the trailing 12-month series as CSV
    #[arg(long)]
    csv: bool,
}

impl CashflowCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let month = match &self.month {
            Some(s) => Month::parse(s)
                .ok_or_else(|| anyhow::anyhow!("invalid month '{}', expected YYYY-MM", s))?,
            None => Month::from_date(chrono::Utc::now().date_naive()),
        };

        let portfolio = read_portfolio(&self.file)?;
        let report = engine::cash_flow_report(&portfolio, &self.property, month)?;

        if self.json {
            return print_json(&report);
        }
        if self.csv {
            return write_monthly_csv(&report.monthly_cash_flows);
        }

        println!();
        println!("CASH FLOW STATEMENT ({}, {})", self.property, report.month);
        println!();
        println!("INCOME");
        println!("  Rental Income: {}", format_money(report.monthly_rental_income));
        println!("  Other Income: {}", format_money(report.other_monthly_income));
        println!("  Total Income: {}", format_money(report.total_monthly_income));
        println!();
        println!("OPERATING EXPENSES");
        println!("  Vacancy Loss: {}", format_money(report.vacancy_loss));
        println!("  Property Management: {}", format_money(report.property_management));
        println!("  Property Tax: {}", format_money(report.property_tax));
        println!("  Insurance: {}", format_money(report.insurance));
        println!("  Maintenance: {}", format_money(report.maintenance));
        println!("  Utilities: {}", format_money(report.utilities));
        println!("  Other: {}", format_money(report.other_expenses));
        println!("  Total Operating: {}", format_money(report.total_operating_expenses));
        println!();
        println!("  NOI: {}", format_money(report.net_operating_income));
        println!();
        println!("FINANCING");
        println!("  Mortgage: {}", format_money(report.mortgage_payment));
        println!("  Other Financing: {}", format_money(report.other_financing_costs));
        println!("  Total Financing: {}", format_money(report.total_financing_costs));
        println!();
        println!("  Monthly Cash Flow: {}", format_money(report.monthly_cash_flow));
        println!("  Annual Cash Flow: {}", format_money(report.annual_cash_flow));
        println!("  Cash-on-Cash: {}", format_pct(report.cash_on_cash_return));
        println!("  Cap Rate: {}", format_pct(report.cap_rate));
        println!();
        println!("TRAILING 12 MONTHS");
        print_monthly_table(&report.monthly_cash_flows);
        Ok(())
    }
}
