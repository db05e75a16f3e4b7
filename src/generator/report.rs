//! Plain-text validation report.

use crate::validation::ValidationResult;
use std::fmt::Write;

/// Render a validation result as a human-readable report.
pub fn generate_validation_report(result: &ValidationResult) -> String {
    let mut output = String::new();

    writeln!(output, "RailML Validation Report").unwrap();
    writeln!(output, "{}", "=".repeat(50)).unwrap();
    writeln!(output).unwrap();

    writeln!(
        output,
        "Status: {}",
        if result.is_valid { "VALID" } else { "INVALID" }
    )
    .unwrap();
    writeln!(output, "Errors: {}", result.errors.len()).unwrap();
    writeln!(output, "Warnings: {}", result.warnings.len()).unwrap();
    writeln!(output).unwrap();

    write_section(&mut output, "ERRORS", &result.errors);
    write_section(&mut output, "WARNINGS", &result.warnings);

    if result.is_valid {
        writeln!(
            output,
            "✅ Document is valid according to RailML schema guidelines."
        )
        .unwrap();
    } else {
        writeln!(
            output,
            "❌ Document contains errors that need to be addressed."
        )
        .unwrap();
    }

    output
}

fn write_section(output: &mut String, title: &str, messages: &[String]) {
    if messages.is_empty() {
        return;
    }

    writeln!(output, "{}:", title).unwrap();
    writeln!(output, "{}", "-".repeat(20)).unwrap();
    for (index, message) in messages.iter().enumerate() {
        writeln!(output, "{}. {}", index + 1, message).unwrap();
    }
    writeln!(output).unwrap();
}
