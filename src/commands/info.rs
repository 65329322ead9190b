use colored::Colorize;
use seat_apportion::formats::read_rules;
use std::path::Path;

/// Validate a rules file and describe it.
pub fn info(rules_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let rules = read_rules(rules_path)?;

    println!("📋 Rules: {}", rules.name.bright_cyan());
    println!(
        "  Dividers: primary {}, adjustment {}, allocation {}",
        rules.primary_divider.to_string().yellow(),
        rules.adjustment_divider.to_string().yellow(),
        rules.adjustment_allocation_divider.to_string().yellow()
    );
    println!(
        "  Adjustment method: {} (threshold {:.2}%)",
        rules.adjustment_method.to_string().yellow(),
        rules.adjustment_threshold * 100.0
    );
    println!("  Parties: {}", rules.parties.join(", "));
    for constituency in &rules.constituencies {
        println!(
            "  🏛  {}: {} constituency + {} adjustment seats",
            constituency.name.green(),
            constituency.num_const_seats,
            constituency.num_adj_seats
        );
    }
    println!(
        "✅ {} seats in total, {} of them adjustment seats",
        rules.total_seats().to_string().bright_green().bold(),
        rules.total_adjustment_seats()
    );
    Ok(())
}
