use crate::core::ReconciliationOutput;
use crate::io::output::OutputWriter;
use colored::*;

/// Short colored summary of an `xml` run on stdout.
pub struct TerminalWriter;

impl Default for TerminalWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalWriter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputWriter for TerminalWriter {
    fn write_results(&mut self, results: &ReconciliationOutput) -> anyhow::Result<()> {
        println!();
        println!("{}", "Zephyr integration check".bold().cyan());
        println!("───────────────────────────────────────────");
        print_count("Missing IDs", results.missing_ids.len());
        print_count("Duplicated IDs", results.duplicate_keys.len());

        match &results.tsm {
            Some(tsm) => {
                print_count("Missing cases in code", tsm.should_be_in_code.len());
                print_count("Missing cases in Zephyr", tsm.should_be_in_zephyr.len());
                print_count("Missing labels in Zephyr", tsm.missing_status.len());
                print_count("Deprecated cases in Zephyr", tsm.deprecated_case.len());
            }
            None => println!(
                "  {}",
                "TCM comparison skipped (catalog unavailable)".yellow()
            ),
        }

        if let Some(coverage) = &results.coverage {
            println!(
                "  Automated: {} of {} automatable ({:.2}%)",
                coverage.count_by_automation_status.done,
                coverage.can_be_automated,
                coverage.percentages.automated_of_can_be
            );
        }
        println!();
        Ok(())
    }
}

fn print_count(label: &str, count: usize) {
    let value = if count == 0 {
        count.to_string().green()
    } else {
        count.to_string().red().bold()
    };
    println!("  {label}: {value}");
}
