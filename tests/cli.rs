//! E2E tests for the report subcommands

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new("cargo")
        .args(["run", "--"])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

#[test]
fn financial_report_table() {
    let output = run(&[
        "financial",
        "-f",
        "tests/data/portfolio.json",
        "-p",
        "maple-12",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("FINANCIAL REPORT"));
    assert!(stdout.contains("NOI"));
    assert!(stdout.contains("Monthly Rent"));
    assert!(stdout.contains("MONTHLY SUMMARY"));
}

#[test]
fn financial_report_json() {
    let output = run(&[
        "financial",
        "-f",
        "tests/data/portfolio.json",
        "-p",
        "maple-12",
        "--from",
        "2024-01-01",
        "--to",
        "2024-01-31",
        "--json",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("\"total_income\""));
    assert!(stdout.contains("\"monthly_summary\""));
    // January: 1850 rent + 95 laundry
    assert!(stdout.contains("1945"));
}

#[test]
fn financial_unknown_property_fails() {
    let output = run(&[
        "financial",
        "-f",
        "tests/data/portfolio.json",
        "-p",
        "no-such-property",
    ]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("property not found"));
}

#[test]
fn cashflow_statement() {
    let output = run(&[
        "cashflow",
        "-f",
        "tests/data/portfolio.json",
        "-p",
        "maple-12",
        "-m",
        "2024-01",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("CASH FLOW STATEMENT"));
    assert!(stdout.contains("Mortgage"));
    assert!(stdout.contains("TRAILING 12 MONTHS"));
    // Mortgage is financing, not an operating expense
    assert!(stdout.contains("Total Operating: $920.00"));
    assert!(stdout.contains("Total Financing: $950.00"));
}

#[test]
fn cashflow_csv_series() {
    let output = run(&[
        "cashflow",
        "-f",
        "tests/data/portfolio.json",
        "-p",
        "maple-12",
        "-m",
        "2024-01",
        "--csv",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("month,income,expenses"));
    assert!(stdout.contains("2024-01"));
    // Zero-filled month with no transactions
    assert!(stdout.contains("2023-02,0.00,0.00"));
}

#[test]
fn performance_portfolio_table() {
    let output = run(&[
        "performance",
        "-f",
        "tests/data/portfolio.json",
        "--as-of",
        "2024-06-01",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("12 Maple Street"));
    assert!(stdout.contains("7 Oak Avenue"));
    assert!(stdout.contains("Cap Rate"));
}

#[test]
fn performance_single_property_json() {
    let output = run(&[
        "performance",
        "-f",
        "tests/data/portfolio.json",
        "-p",
        "maple-12",
        "--as-of",
        "2024-06-01",
        "--json",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("\"purchase_price\""));
    assert!(stdout.contains("\"annualized_return\""));
    // Two units, one occupied
    assert!(stdout.contains("\"occupancy_rate\": \"50"));
}

#[test]
fn tax_report_deductible_only() {
    let output = run(&[
        "tax",
        "-f",
        "tests/data/portfolio.json",
        "-p",
        "maple-12",
        "-y",
        "2024",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("TAX REPORT"));
    // Mortgage and fines are not deductible
    assert!(!stdout.contains("Parking Fines"));
    assert!(stdout.contains("Property Tax"));
}

#[test]
fn compare_years() {
    let output = run(&[
        "compare",
        "-f",
        "tests/data/portfolio.json",
        "-p",
        "maple-12",
        "--start-year",
        "2023",
        "--end-year",
        "2024",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("MULTI-YEAR TAX COMPARISON"));
    assert!(stdout.contains("2023"));
    assert!(stdout.contains("2024"));
}

#[test]
fn compare_rejects_wide_range() {
    let output = run(&[
        "compare",
        "-f",
        "tests/data/portfolio.json",
        "-p",
        "maple-12",
        "--start-year",
        "2020",
        "--end-year",
        "2026",
    ]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("5-year maximum"));
}

#[test]
fn estimate_flat_rate() {
    let output = run(&[
        "estimate",
        "-f",
        "tests/data/portfolio.json",
        "-p",
        "maple-12",
        "-y",
        "2024",
        "-r",
        "25",
        "--additional-deductions",
        "1000",
        "--json",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("\"projected_savings\": \"250"));
}

#[test]
fn brackets_calculation() {
    let output = run(&[
        "brackets",
        "-f",
        "tests/data/portfolio.json",
        "-p",
        "maple-12",
        "-y",
        "2024",
        "-b",
        "tests/data/brackets.json",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("BRACKET CALCULATION"));
    assert!(stdout.contains("Effective Rate"));
}

#[test]
fn brackets_rejects_non_contiguous_table() {
    let output = run(&[
        "brackets",
        "-f",
        "tests/data/portfolio.json",
        "-p",
        "maple-12",
        "-y",
        "2024",
        "-b",
        "tests/data/bad_brackets.json",
    ]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("must equal previous upper bound"));
}

#[test]
fn schema_output() {
    let output = run(&["schema", "portfolio"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("$schema"));
    assert!(stdout.contains("transactions"));
}
