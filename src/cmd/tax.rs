//! Tax commands - annual report, multi-year comparison, flat estimation
//! and bracket calculation

use crate::analytics::CategorySummary;
use crate::cmd::{format_money, format_pct, print_json, read_portfolio};
use crate::engine;
use crate::tax::brackets::BracketInput;
use clap::Args;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct TaxCommand {
    /// Portfolio snapshot JSON file (or - for stdin)
    #[arg(short, long)]
    file: PathBuf,

    /// Property identifier
    #[arg(short, long)]
    property: String,

    /// Tax year to report
    #[arg(short, long)]
    year: i32,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl TaxCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let portfolio = read_portfolio(&self.file)?;
        let report = engine::tax_report(&portfolio, &self.property, self.year)?;

        if self.json {
            return print_json(&report);
        }

        println!();
        println!("TAX REPORT ({}, {})", self.property, report.tax_year);
        println!();
        println!("  Total Income: {}", format_money(report.total_income));
        println!(
            "  Deductible Expenses: {}",
            format_money(report.total_deductible_expenses)
        );
        println!("  Taxable Income: {}", format_money(report.taxable_income));
        println!();
        if !report.income_categories.is_empty() {
            println!("INCOME CATEGORIES");
            print_categories(&report.income_categories);
        }
        if !report.expense_categories.is_empty() {
            println!("DEDUCTIBLE EXPENSE CATEGORIES");
            print_categories(&report.expense_categories);
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct CompareCommand {
    /// Portfolio snapshot JSON file (or - for stdin)
    #[arg(short, long)]
    file: PathBuf,

    /// Property identifier
    #[arg(short, long)]
    property: String,

    /// First year of the comparison
    #[arg(long)]
    start_year: i32,

    /// Last year of the comparison (at most 5 years after start)
    #[arg(long)]
    end_year: i32,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl CompareCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let portfolio = read_portfolio(&self.file)?;
        let comparison = engine::multi_year_comparison(
            &portfolio,
            &self.property,
            self.start_year,
            self.end_year,
        )?;

        if self.json {
            return print_json(&comparison);
        }

        println!();
        println!(
            "MULTI-YEAR TAX COMPARISON ({}, {}-{})",
            self.property, comparison.start_year, comparison.end_year
        );
        let rows: Vec<YearRow> = comparison
            .yearly_data
            .iter()
            .map(|y| YearRow {
                year: y.year.to_string(),
                total_income: format_money(y.total_income),
                deductible: format_money(y.total_deductible_expenses),
                taxable: format_money(y.taxable_income),
                income_change: format_pct(y.year_over_year_income_change),
                expense_change: format_pct(y.year_over_year_expense_change),
            })
            .collect();
        print_table(rows);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct EstimateCommand {
    /// Portfolio snapshot JSON file (or - for stdin)
    #[arg(short, long)]
    file: PathBuf,

    /// Property identifier
    #[arg(short, long)]
    property: String,

    /// Tax year the estimate is based on
    #[arg(short, long)]
    year: i32,

    /// Flat tax rate in percent
    #[arg(short, long)]
    rate: Decimal,

    /// What-if additional income
    #[arg(long, default_value = "0")]
    additional_income: Decimal,

    /// What-if additional deductions
    #[arg(long, default_value = "0")]
    additional_deductions: Decimal,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl EstimateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let portfolio = read_portfolio(&self.file)?;
        let estimate = engine::estimate_taxes(
            &portfolio,
            &self.property,
            self.year,
            self.rate,
            self.additional_income,
            self.additional_deductions,
        )?;

        if self.json {
            return print_json(&estimate);
        }

        println!();
        println!("TAX ESTIMATE ({}, {})", self.property, estimate.tax_year);
        println!();
        println!(
            "  Current Taxable Income: {}",
            format_money(estimate.current_taxable_income)
        );
        println!(
            "  Estimated Taxable Income: {}",
            format_money(estimate.estimated_taxable_income)
        );
        println!(
            "  Current Liability @ {}: {}",
            format_pct(estimate.tax_rate),
            format_money(estimate.current_tax_liability)
        );
        println!(
            "  Estimated Liability: {}",
            format_money(estimate.estimated_tax_liability)
        );
        println!("  Projected Savings: {}", format_money(estimate.projected_savings));
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct BracketsCommand {
    /// Portfolio snapshot JSON file (or - for stdin)
    #[arg(short, long)]
    file: PathBuf,

    /// Property identifier
    #[arg(short, long)]
    property: String,

    /// Tax year the calculation is based on
    #[arg(short, long)]
    year: i32,

    /// JSON file with the bracket table
    #[arg(short, long)]
    brackets: PathBuf,

    /// What-if additional income
    #[arg(long, default_value = "0")]
    additional_income: Decimal,

    /// What-if additional deductions
    #[arg(long, default_value = "0")]
    additional_deductions: Decimal,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl BracketsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let file = File::open(&self.brackets)?;
        let input: BracketInput = serde_json::from_reader(BufReader::new(file))?;

        let portfolio = read_portfolio(&self.file)?;
        let calc = engine::calculate_with_brackets(
            &portfolio,
            &self.property,
            self.year,
            &input.brackets,
            self.additional_income,
            self.additional_deductions,
        )?;

        if self.json {
            return print_json(&calc);
        }

        println!();
        println!("BRACKET CALCULATION ({}, {})", self.property, self.year);
        println!();
        println!("  Taxable Income: {}", format_money(calc.taxable_income));
        println!(
            "  Estimated Liability: {}",
            format_money(calc.estimated_tax_liability)
        );
        println!("  Effective Rate: {}", format_pct(calc.effective_tax_rate));
        println!();
        let rows: Vec<BracketRow> = calc
            .bracket_breakdown
            .iter()
            .map(|b| BracketRow {
                range: format!("{} - {}", format_money(b.lower_bound), format_money(b.upper_bound)),
                rate: format_pct(b.rate),
                income: format_money(b.income_in_bracket),
                tax: format_money(b.tax_for_bracket),
            })
            .collect();
        print_table(rows);
        Ok(())
    }
}

/// Row for the multi-year comparison table
#[derive(Debug, Tabled)]
struct YearRow {
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Income")]
    total_income: String,
    #[tabled(rename = "Deductible")]
    deductible: String,
    #[tabled(rename = "Taxable")]
    taxable: String,
    #[tabled(rename = "Income Δ")]
    income_change: String,
    #[tabled(rename = "Expense Δ")]
    expense_change: String,
}

/// Row for the bracket breakdown table
#[derive(Debug, Tabled)]
struct BracketRow {
    #[tabled(rename = "Bracket")]
    range: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Income In Bracket")]
    income: String,
    #[tabled(rename = "Tax")]
    tax: String,
}

fn print_categories(categories: &[CategorySummary]) {
    let rows: Vec<CategoryRow> = categories
        .iter()
        .map(|c| CategoryRow {
            name: c.name.clone(),
            amount: format_money(c.amount),
            percentage: format_pct(c.percentage),
        })
        .collect();
    print_table(rows);
}

#[derive(Debug, Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Share")]
    percentage: String,
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!();
}
