use clap::{Parser, Subcommand};

mod analytics;
mod cmd;
mod engine;
mod portfolio;
mod tax;

#[derive(Parser, Debug)]
#[command(
    name = "rentfolio",
    version,
    about = "Financial and tax analytics for rental property portfolios"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Income/expense summary for a property
    Financial(cmd::financial::FinancialCommand),
    /// Monthly cash-flow statement for a property
    Cashflow(cmd::cashflow::CashflowCommand),
    /// Investment performance metrics
    Performance(cmd::performance::PerformanceCommand),
    /// Annual tax report
    Tax(cmd::tax::TaxCommand),
    /// Multi-year tax comparison
    Compare(cmd::tax::CompareCommand),
    /// Flat-rate tax estimation
    Estimate(cmd::tax::EstimateCommand),
    /// Progressive tax calculation with a bracket table
    Brackets(cmd::tax::BracketsCommand),
    /// Print expected input formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Financial(c) => c.exec(),
        Command::Cashflow(c) => c.exec(),
        Command::Performance(c) => c.exec(),
        Command::Tax(c) => c.exec(),
        Command::Compare(c) => c.exec(),
        Command::Estimate(c) => c.exec(),
        Command::Brackets(c) => c.exec(),
        Command::Schema(c) => c.exec(),
    }
}
