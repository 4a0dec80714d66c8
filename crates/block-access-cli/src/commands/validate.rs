//! Validate command: parse the configured settings and show the rules.

use anyhow::{Context, Result};
use block_access::RuleSet;

use super::{Format, SourceArgs};
use crate::style::{print_error, print_hint, print_success, print_warn, rule_table};

pub fn run(source: &SourceArgs, format: Format) -> Result<()> {
    let config = source.load().context("Failed to load configuration")?;

    let rules = match config.validate() {
        Ok(rules) => rules,
        Err(e) => {
            print_error(&format!("Configuration is invalid: {e}"));
            return Err(e.into());
        }
    };

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&rules)?),
        Format::Toml => println!("{}", toml::to_string_pretty(&rules)?),
        Format::Text => print_text(&rules),
    }

    Ok(())
}

fn print_text(rules: &RuleSet) {
    if rules.is_empty() {
        print_success("Configuration is valid");
        print_hint("block_access.intervals is empty, so every login is allowed");
        return;
    }

    print_success(&format!(
        "Configuration is valid ({} interval{})",
        rules.len(),
        if rules.len() == 1 { "" } else { "s" }
    ));
    println!("{}", rule_table(rules));

    for (index, rule) in rules.iter().enumerate() {
        if rule.is_inverted() {
            print_warn(&format!(
                "interval #{index} ends before it starts and never matches: {rule}"
            ));
        }
    }
}
