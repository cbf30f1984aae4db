//! Rules command
//!
//! Lists the fields of a rule file and flags tokens that do not translate.

use crate::error::CliResult;
use colored::Colorize;
use fieldcheck_config::{RuleSet, try_parse_token};
use serde_json::Value;
use std::path::Path;

pub fn execute(rules: &Path) -> CliResult<()> {
    let rule_set = RuleSet::from_file(rules)?;
    let mut malformed = 0;

    for (field, tokens) in rule_set.iter() {
        println!("  {}", field.bright_white().bold());
        if tokens.is_empty() {
            println!("      {}", "(no rules)".dimmed());
        }

        for token in tokens {
            match token {
                Value::String(token) => match try_parse_token(token) {
                    Ok(_) => println!("      {} {}", "✓".green(), token),
                    Err(e) => {
                        malformed += 1;
                        println!("      {} {} {}", "✗".red(), token.yellow(), format!("({})", e).dimmed());
                    }
                },
                other => {
                    malformed += 1;
                    println!(
                        "      {} {} {}",
                        "✗".red(),
                        other.to_string().yellow(),
                        "(not a rule token)".dimmed()
                    );
                }
            }
        }
    }

    println!();
    println!("  {} field(s), {} malformed rule(s)", rule_set.len(), malformed);
    Ok(())
}
