//! Check command
//!
//! Validates a record file against a rule file and prints the report.

use crate::error::CliResult;
use colored::Colorize;
use fieldcheck_config::{OutputFormat, RuleSet, load_record};
use fieldcheck_validation::Report;
use std::path::Path;
use tracing::debug;

/// Run the check; returns whether the record is valid.
pub fn execute(rules: &Path, record: &Path, format: OutputFormat) -> CliResult<bool> {
    let rule_set = RuleSet::from_file(rules)?;
    let record = load_record(record)?;
    debug!(fields = rule_set.len(), values = record.len(), "checking record");

    let report = rule_set.to_rule_map().validate(&record);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report.to_json())?),
        OutputFormat::Pretty => print_report(&report),
    }

    Ok(report.is_valid())
}

fn print_report(report: &Report) {
    for (field, messages) in report.iter() {
        let errors: Vec<_> = messages.iter().filter(|m| !m.is_empty()).collect();
        if errors.is_empty() {
            println!("  {} {}", "✓".green().bold(), field);
        } else {
            println!("  {} {}", "✗".red().bold(), field.bold());
            for message in errors {
                println!("      {} {}", "-".dimmed(), message.red());
            }
        }
    }

    println!();
    if report.is_valid() {
        println!("  {}", "Record is valid".green().bold());
    } else {
        println!(
            "  {} {} error(s) in {} field(s)",
            "✗".red().bold(),
            report.error_count(),
            report.failing_fields().count()
        );
    }
}
