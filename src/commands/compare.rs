use colored::Colorize;
use seat_apportion::election::compare_methods;
use seat_apportion::formats::{read_rules, read_votes};
use seat_apportion::reports::{comparison_table, write_comparison};
use std::path::Path;

/// Run every adjustment method over the same election and compare deviations.
pub fn compare(
    rules_path: &Path,
    votes_path: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let rules = read_rules(rules_path)?;
    let votes = read_votes(votes_path, &rules)?;

    println!("🔍 Comparing adjustment methods for {}", rules.name.bright_cyan());
    let compared = compare_methods(&rules, &votes)?;
    println!("{}", comparison_table(&rules.parties, &compared));

    let exact = compared.iter().filter(|(_, r)| r.deviation == 0).count();
    println!(
        "✅ {} of {} methods match the national entitlement",
        exact.to_string().bright_green().bold(),
        compared.len()
    );

    if let Some(output) = output {
        write_comparison(output, &compared)?;
        println!("💾 Comparison written to {}", output.display().to_string().bright_green());
    }
    Ok(())
}
