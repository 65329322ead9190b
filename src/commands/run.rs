use colored::Colorize;
use seat_apportion::election::Election;
use seat_apportion::formats::{read_rules, read_votes};
use seat_apportion::methods::AdjustmentMethod;
use seat_apportion::reports::{results_json, results_table, write_report};
use std::path::Path;

/// Run one election and print its seat allocation.
pub fn run(
    rules_path: &Path,
    votes_path: &Path,
    method: Option<AdjustmentMethod>,
    output: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut rules = read_rules(rules_path)?;
    if let Some(method) = method {
        rules.adjustment_method = method;
    }
    let votes = read_votes(votes_path, &rules)?;

    let mut election = Election::new(rules, votes)?;
    let results = election.run()?;

    if json {
        println!("{}", results_json(&results)?);
    } else {
        println!(
            "🗳  {} with {}",
            results.rules.name.bright_cyan(),
            results.rules.adjustment_method.to_string().yellow()
        );
        println!("{}", results_table(&results));
        if results.deviation == 0 {
            println!("✅ Party totals match the national entitlement");
        } else {
            println!(
                "⚠️  Party totals deviate from the national entitlement by {}",
                results.deviation.to_string().bright_red().bold()
            );
        }
        if let Some(entropy) = results.entropy {
            println!("Entropy: {:.4}", entropy);
        }
    }

    if let Some(output) = output {
        write_report(output, election.votes(), &results)?;
        println!("💾 Results written to {}", output.display().to_string().bright_green());
    }
    Ok(())
}
