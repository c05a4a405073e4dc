use clap::Parser;
use month_match::core::history::{month_label, today};
use month_match::utils::error::{ErrorSeverity, MatchError};
use month_match::utils::logger::{self, LogFormat};
use month_match::utils::validation::{validate_required_field, Validate};
use month_match::{try_matches, CliConfig, MonthlyHistory, MonthlySummary, RunConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    let format = if config.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_cli_logger(config.verbose, format);

    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        exit_with(&e);
    }

    if let Err(e) = run(&config) {
        tracing::error!(
            "Run failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        exit_with(&e);
    }

    Ok(())
}

fn run(config: &RunConfig) -> month_match::Result<()> {
    if let Some(date) = &config.date {
        let matched = match try_matches(date, config.day, config.month, config.year) {
            Ok(matched) => matched,
            Err(e) => {
                tracing::warn!("{}", e);
                false
            }
        };
        println!("{}", matched);
        return Ok(());
    }

    let source = validate_required_field("input", &config.source)?.clone();
    let history = MonthlyHistory::new(source);

    if config.today {
        let date = today();
        let summary = history.day(&date)?;
        println!("{}", date);
        print_summary(&summary);
    } else {
        let summary = history.month(config)?;
        println!("{}", month_label(config.month, config.year)?);
        print_summary(&summary);
    }

    Ok(())
}

fn print_summary(summary: &MonthlySummary) {
    for transaction in &summary.transactions {
        println!(
            "  {:<8} {:<24} {:<16} ${:.2}",
            transaction.kind.as_str(),
            transaction.title,
            transaction.category,
            transaction.amount
        );
    }
    println!(
        "Total Income = ${:.2} | Total Expenses = ${:.2}",
        summary.total_income, summary.total_expense
    );
}

fn exit_with(e: &MatchError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
