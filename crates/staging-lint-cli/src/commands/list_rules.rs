//! List rules command implementation.

use staging_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!(
        "{:<24} {:<24} {:<8} Description",
        "Code", "Name", "Severity"
    );
    println!("{}", "-".repeat(100));

    for rule in all_rules() {
        println!(
            "{:<24} {:<24} {:<8} {}",
            rule.code(),
            rule.name(),
            rule.default_severity().to_string(),
            rule.description()
        );
    }

    println!("\ncte-presence reports each missing block as CTE_MISSING_<NAME>.");
    println!("\nDisable a rule or change its severity in staging-lint.toml, e.g.:");
    println!("  [rules.surrogate-key]");
    println!("  enabled = false");
}
